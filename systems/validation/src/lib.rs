#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure per-field validators for simulation descriptors.
//!
//! Each validator inspects a single raw field (plus the already validated
//! values it depends on) and either returns the typed value, substitutes the
//! documented default, or fails with a [`ValidationError`]. Validators never
//! consult each other; the descriptor decides the order in which dependent
//! fields are resolved.

use std::cmp::Ordering;

use cell_society_core::{
    cell_count, CellShape, CodecError, EdgePolicy, Grid, MessageCatalog, MessageKey, RuleProfile,
    SimulationKind, ValidationError, FIELD_SEPARATOR, MAX_CELL_COUNT, NEIGHBOR_GRID_SIZE,
};
use cell_society_system_grid_codec as grid_codec;
use cell_society_system_state_synthesizer as state_synthesizer;
use rand::Rng;
use tracing::debug;

/// Resolves the simulation type from its descriptor name.
pub fn simulation_kind(name: &str) -> Result<SimulationKind, ValidationError> {
    SimulationKind::from_name(name).ok_or_else(|| ValidationError::InvalidSimName {
        name: name.to_owned(),
    })
}

/// Returns the title, or the localized placeholder when it is absent.
#[must_use]
pub fn title(value: Option<&str>, messages: &dyn MessageCatalog) -> String {
    text_or_placeholder(value, MessageKey::NoTitle, messages)
}

/// Returns the author, or the localized placeholder when it is absent.
#[must_use]
pub fn author(value: Option<&str>, messages: &dyn MessageCatalog) -> String {
    text_or_placeholder(value, MessageKey::NoAuthor, messages)
}

/// Returns the description, or the localized placeholder when it is absent.
#[must_use]
pub fn description(value: Option<&str>, messages: &dyn MessageCatalog) -> String {
    text_or_placeholder(value, MessageKey::NoDescription, messages)
}

fn text_or_placeholder(
    value: Option<&str>,
    placeholder: MessageKey,
    messages: &dyn MessageCatalog,
) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => {
            debug!(key = %placeholder, "substituting placeholder text");
            messages.message(placeholder).to_owned()
        }
    }
}

/// Validates the column count. Zero and negative counts are rejected.
pub fn columns(value: i64) -> Result<u32, ValidationError> {
    positive_dimension(value).ok_or(ValidationError::InvalidCols { value })
}

/// Validates the row count. Zero and negative counts are rejected.
pub fn rows(value: i64) -> Result<u32, ValidationError> {
    positive_dimension(value).ok_or(ValidationError::InvalidRows { value })
}

fn positive_dimension(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|dimension| *dimension > 0)
}

/// Resolves the cell shape.
///
/// Unrecognized values fall back to [`CellShape::Square`]. Triangle cells need
/// an even number of rows and columns; anything else is a hard failure.
/// `dimensions` yields `(rows, columns)` and is only consulted for triangles.
pub fn shape<F>(value: Option<&str>, dimensions: F) -> Result<CellShape, ValidationError>
where
    F: FnOnce() -> Result<(u32, u32), ValidationError>,
{
    let Some(shape) = value.and_then(CellShape::parse) else {
        debug!(value = ?value, "unrecognized shape, defaulting to square");
        return Ok(CellShape::Square);
    };
    if shape != CellShape::Triangle {
        return Ok(shape);
    }

    let (rows, columns) = dimensions()?;
    if rows % 2 != 0 || columns % 2 != 0 {
        return Err(ValidationError::OddValuesWhenTriangle { rows, columns });
    }
    Ok(shape)
}

/// Resolves the edge policy, falling back to [`EdgePolicy::Finite`].
#[must_use]
pub fn edge_policy(value: Option<&str>) -> EdgePolicy {
    value.and_then(EdgePolicy::parse).unwrap_or_else(|| {
        debug!(value = ?value, "unrecognized edge type, defaulting to finite");
        EdgePolicy::Finite
    })
}

/// Interprets the grid-line flag. Only an exact `1` enables grid lines.
#[must_use]
pub fn grid_lines(value: Option<i64>) -> bool {
    match value {
        Some(1) => true,
        Some(0) => false,
        other => {
            debug!(value = ?other, "grid-line flag is not 0 or 1, treating as disabled");
            false
        }
    }
}

/// Produces the initial cell states for a `columns` by `rows` grid.
///
/// Absent or empty encodings are replaced with a grid synthesized from `rng`.
/// Otherwise the encoding must hold exactly one value per cell and every value
/// must be a state of the rule described by `profile`. Grids larger than
/// [`MAX_CELL_COUNT`] cells are rejected before anything is allocated.
pub fn initial_states<R>(
    encoded: Option<&str>,
    columns: u32,
    rows: u32,
    profile: RuleProfile,
    rng: &mut R,
) -> Result<Grid<i32>, ValidationError>
where
    R: Rng + ?Sized,
{
    let num_states = profile.num_states();
    let expected = cell_count(columns, rows);
    if expected > MAX_CELL_COUNT {
        return Err(ValidationError::GridTooLarge {
            columns,
            rows,
            limit: MAX_CELL_COUNT,
        });
    }

    let encoded = match encoded {
        None | Some("") => {
            debug!(columns, rows, num_states, "synthesizing random initial states");
            return Ok(state_synthesizer::synthesize(
                columns,
                rows,
                profile.state_count(),
                rng,
            ));
        }
        Some(encoded) => encoded,
    };

    let values = grid_codec::parse_values(encoded).map_err(|error| match error {
        CodecError::MalformedEncoding { token, .. } => ValidationError::InvalidStates {
            value: token,
            num_states,
        },
        other => ValidationError::Codec(other),
    })?;

    if values.len() != expected {
        return Err(ValidationError::InvalidCoordinates {
            expected,
            found: values.len(),
        });
    }

    if let Some(state) = values
        .iter()
        .find(|state| u32::try_from(**state).map_or(true, |state| state >= num_states))
    {
        return Err(ValidationError::InvalidStates {
            value: state.to_string(),
            num_states,
        });
    }

    Ok(Grid::from_row_major(columns, rows, values)?)
}

/// Decodes the 3x3 neighbor offset grid.
pub fn neighbor_offsets(encoded: &str) -> Result<Grid<i32>, ValidationError> {
    Ok(grid_codec::decode(
        encoded,
        NEIGHBOR_GRID_SIZE,
        NEIGHBOR_GRID_SIZE,
    )?)
}

/// Splits the color list and checks it holds one color per rule state.
///
/// Tokens are returned exactly as written. A single trailing separator is
/// tolerated and an empty list holds no colors.
pub fn colors(encoded: &str, profile: RuleProfile) -> Result<Vec<String>, ValidationError> {
    let colors: Vec<String> = if encoded.is_empty() {
        Vec::new()
    } else {
        encoded
            .strip_suffix(FIELD_SEPARATOR)
            .unwrap_or(encoded)
            .split(FIELD_SEPARATOR)
            .map(str::to_owned)
            .collect()
    };

    let expected = profile.num_states();
    let found = colors.len();
    let ordering = usize::try_from(expected).map_or(Ordering::Less, |states| found.cmp(&states));
    match ordering {
        Ordering::Equal => Ok(colors),
        Ordering::Greater => Err(ValidationError::TooManyColors { expected, found }),
        Ordering::Less => Err(ValidationError::TooFewColors { expected, found }),
    }
}
