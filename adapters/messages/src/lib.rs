#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Localized message bundles backing the [`MessageCatalog`] collaborator.
//!
//! A bundle is a TOML document naming its locale and mapping every
//! [`MessageKey`] to display text:
//!
//! ```toml
//! locale = "English"
//!
//! [messages]
//! InvalidSimName = "The simulation type is not recognized."
//! # ... one entry per key
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use anyhow::{bail, Context, Result};
use cell_society_core::{MessageCatalog, MessageKey};

/// Locale identifier of the bundle compiled into the binary.
pub const DEFAULT_LOCALE: &str = "English";

const ENGLISH_MESSAGES: [(MessageKey, &str); 11] = [
    (
        MessageKey::InvalidSimName,
        "The simulation type is not recognized.",
    ),
    (MessageKey::NoTitle, "Untitled simulation"),
    (MessageKey::NoAuthor, "Unknown author"),
    (
        MessageKey::OddValuesWhenTriangle,
        "Triangle cells require an even number of rows and columns.",
    ),
    (
        MessageKey::InvalidCols,
        "The number of columns must be a positive integer.",
    ),
    (
        MessageKey::InvalidRows,
        "The number of rows must be a positive integer.",
    ),
    (
        MessageKey::InvalidStates,
        "The initial configuration contains a state the simulation does not support.",
    ),
    (
        MessageKey::InvalidCoordinates,
        "The initial configuration does not match the grid dimensions.",
    ),
    (
        MessageKey::TooManyColors,
        "More colors were given than the simulation has states.",
    ),
    (
        MessageKey::TooFewColors,
        "Fewer colors were given than the simulation has states.",
    ),
    (MessageKey::NoDescription, "No description provided."),
];

/// Complete set of localized messages for one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBundle {
    locale: String,
    messages: BTreeMap<MessageKey, String>,
}

impl MessageBundle {
    /// Returns the built-in English bundle.
    #[must_use]
    pub fn english() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            messages: ENGLISH_MESSAGES
                .into_iter()
                .map(|(key, text)| (key, text.to_owned()))
                .collect(),
        }
    }

    /// Loads a bundle from the TOML file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read message bundle at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid message bundle at {}", path.display()))
    }

    /// Parses a bundle from TOML text.
    ///
    /// The bundle must define every [`MessageKey`] and nothing else.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: BundleFile =
            toml::from_str(contents).context("failed to parse message bundle toml contents")?;
        if file.locale.trim().is_empty() {
            bail!("message bundle must name its locale");
        }

        let mut resolved = BTreeMap::new();
        let mut unexpected = Vec::new();
        for (name, text) in file.messages {
            match MessageKey::from_str_key(&name) {
                Some(key) => {
                    let _ = resolved.insert(key, text);
                }
                None => unexpected.push(name),
            }
        }

        if !unexpected.is_empty() {
            unexpected.sort();
            bail!(
                "message bundle contains unexpected keys: {}",
                unexpected.join(", ")
            );
        }

        let missing: Vec<&str> = MessageKey::ALL
            .into_iter()
            .filter(|key| !resolved.contains_key(key))
            .map(MessageKey::as_str)
            .collect();
        if !missing.is_empty() {
            bail!("message bundle is missing keys: {}", missing.join(", "));
        }

        Ok(Self {
            locale: file.locale,
            messages: resolved,
        })
    }
}

impl Default for MessageBundle {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog for MessageBundle {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn message(&self, key: MessageKey) -> &str {
        self.messages
            .get(&key)
            .map_or_else(|| key.as_str(), String::as_str)
    }
}

#[derive(Debug, serde::Deserialize)]
struct BundleFile {
    locale: String,
    messages: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_bundle(locale: &str, extra: &str) -> String {
        let mut contents = format!("locale = \"{locale}\"\n\n[messages]\n");
        for key in MessageKey::ALL {
            contents.push_str(&format!("{key} = \"text for {key}\"\n"));
        }
        contents.push_str(extra);
        contents
    }

    #[test]
    fn english_bundle_defines_every_key() {
        let bundle = MessageBundle::english();
        assert_eq!(bundle.locale(), DEFAULT_LOCALE);
        for key in MessageKey::ALL {
            assert_ne!(bundle.message(key), key.as_str(), "{key} needs real text");
        }
    }

    #[test]
    fn complete_bundle_parses() {
        let bundle = MessageBundle::from_toml_str(&complete_bundle("Pirate", ""))
            .expect("bundle should parse");
        assert_eq!(bundle.locale(), "Pirate");
        assert_eq!(
            bundle.message(MessageKey::TooFewColors),
            "text for TooFewColors"
        );
    }

    #[test]
    fn bundle_requires_all_known_keys() {
        let contents = r#"
            locale = "Partial"

            [messages]
            InvalidSimName = "bad name"
            NoTitle = "untitled"
        "#;

        let result = MessageBundle::from_toml_str(contents);
        assert!(result.is_err(), "bundle missing keys should fail");
    }

    #[test]
    fn bundle_rejects_unknown_keys() {
        let contents = complete_bundle("English", "Extra = \"surplus\"\n");
        let error = MessageBundle::from_toml_str(&contents).expect_err("unknown keys must fail");
        assert!(error.to_string().contains("Extra"));
    }

    #[test]
    fn bundle_requires_locale() {
        let result = MessageBundle::from_toml_str(&complete_bundle(" ", ""));
        assert!(result.is_err(), "blank locale must be rejected");
    }
}
