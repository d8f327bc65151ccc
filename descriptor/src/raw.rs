//! Raw descriptor field maps and their conversion into typed fields.

use std::collections::BTreeMap;

use cell_society_core::{ConfigError, DescriptorField};
use serde::{Deserialize, Deserializer};

/// Loosely typed field map as supplied by a descriptor file.
///
/// Keys outside [`DescriptorField`] are retained for diagnostics but otherwise
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDescriptor {
    values: BTreeMap<String, String>,
}

impl RawDescriptor {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field map from key and value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Returns the raw text stored for `field`.
    #[must_use]
    pub fn get(&self, field: DescriptorField) -> Option<&str> {
        self.values.get(field.key()).map(String::as_str)
    }

    /// Iterator over every stored entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of stored entries, recognized or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Reports whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn required(&self, field: DescriptorField) -> Result<&str, ConfigError> {
        self.get(field).ok_or(ConfigError::MissingField(field))
    }

    fn required_integer(&self, field: DescriptorField) -> Result<i64, ConfigError> {
        let value = self.required(field)?;
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotAnInteger {
                field,
                value: value.to_owned(),
            })
    }

    fn optional(&self, field: DescriptorField) -> Option<String> {
        self.get(field).map(str::to_owned)
    }
}

impl<'de> Deserialize<'de> for RawDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
        Ok(Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key, value.into_text()))
                .collect(),
        })
    }
}

/// Scalar accepted in descriptor files; every variant is kept as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Flag(flag) => u8::from(flag).to_string(),
        }
    }
}

/// Typed descriptor fields prior to validation.
///
/// Integer fields are parsed but not yet range checked; text fields are kept
/// verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DescriptorFields {
    /// Simulation type name.
    pub simulation_name: String,
    /// Optional title.
    pub title: Option<String>,
    /// Optional author credit.
    pub author: Option<String>,
    /// Optional cell shape name.
    pub shape: Option<String>,
    /// Optional edge policy name.
    pub edge_type: Option<String>,
    /// Grid-line flag; `None` when absent or not an integer.
    pub grid_lines: Option<i64>,
    /// Column count.
    pub columns: i64,
    /// Row count.
    pub rows: i64,
    /// Encoded initial states; absent or blank requests random synthesis.
    pub configs: Option<String>,
    /// Encoded 3x3 neighbor offsets.
    pub neighbors: String,
    /// Comma-separated colors, one per rule state.
    pub colors: String,
    /// Optional description.
    pub description: Option<String>,
}

impl DescriptorFields {
    /// Renders the fields back into a raw field map.
    #[must_use]
    pub fn to_raw(&self) -> RawDescriptor {
        let mut raw = RawDescriptor::new();
        let _ = raw.insert(DescriptorField::SimulationName.key(), &*self.simulation_name);
        let _ = raw.insert(DescriptorField::Cols.key(), self.columns.to_string());
        let _ = raw.insert(DescriptorField::Rows.key(), self.rows.to_string());
        let _ = raw.insert(DescriptorField::Neighbors.key(), &*self.neighbors);
        let _ = raw.insert(DescriptorField::Colors.key(), &*self.colors);

        let optional = [
            (DescriptorField::Title, self.title.clone()),
            (DescriptorField::Author, self.author.clone()),
            (DescriptorField::Shape, self.shape.clone()),
            (DescriptorField::EdgeType, self.edge_type.clone()),
            (
                DescriptorField::GridLines,
                self.grid_lines.map(|flag| flag.to_string()),
            ),
            (DescriptorField::Configs, self.configs.clone()),
            (DescriptorField::Description, self.description.clone()),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                let _ = raw.insert(field.key(), value);
            }
        }
        raw
    }
}

impl TryFrom<&RawDescriptor> for DescriptorFields {
    type Error = ConfigError;

    fn try_from(raw: &RawDescriptor) -> Result<Self, Self::Error> {
        Ok(Self {
            simulation_name: raw.required(DescriptorField::SimulationName)?.to_owned(),
            title: raw.optional(DescriptorField::Title),
            author: raw.optional(DescriptorField::Author),
            shape: raw.optional(DescriptorField::Shape),
            edge_type: raw.optional(DescriptorField::EdgeType),
            grid_lines: raw
                .get(DescriptorField::GridLines)
                .and_then(|flag| flag.trim().parse().ok()),
            columns: raw.required_integer(DescriptorField::Cols)?,
            rows: raw.required_integer(DescriptorField::Rows)?,
            configs: raw.optional(DescriptorField::Configs),
            neighbors: raw.required(DescriptorField::Neighbors)?.to_owned(),
            colors: raw.required(DescriptorField::Colors)?.to_owned(),
            description: raw.optional(DescriptorField::Description),
        })
    }
}
