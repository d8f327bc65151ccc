#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cell Society configuration workspace.
//!
//! This crate defines the vocabulary that connects the pure systems, the
//! descriptor aggregate and the adapters. Adapters turn external data into a
//! raw field map, the descriptor validates each field through the systems, and
//! the simulation engine receives strongly typed values built from the types
//! declared here. Collaborators the workspace does not own (rule evaluation and
//! localized message lookup) are expressed as the [`RuleCatalog`] and
//! [`MessageCatalog`] traits.

use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows and columns in the neighbor offset grid.
pub const NEIGHBOR_GRID_SIZE: u32 = 3;

/// Separator used by every comma-encoded descriptor field.
pub const FIELD_SEPARATOR: char = ',';

/// Largest number of cells a descriptor grid may hold.
pub const MAX_CELL_COUNT: usize = 1 << 24;

/// Simulation types recognized by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SimulationKind {
    /// Conway's two-state Game of Life.
    GameOfLife,
    /// Schelling segregation model.
    Segregation,
    /// Wa-Tor style predator and prey model.
    PredatorPrey,
    /// Spreading forest fire.
    Fire,
    /// Cyclic rock, paper, scissors competition.
    RockPaperScissors,
    /// Ants foraging between a nest and food sources.
    ForagingAnts,
    /// Langton's self-replicating loop.
    LangtonsLoop,
    /// Sugarscape agent model.
    SugarScape,
}

impl SimulationKind {
    /// Every recognized simulation type in declaration order.
    pub const ALL: [SimulationKind; 8] = [
        Self::GameOfLife,
        Self::Segregation,
        Self::PredatorPrey,
        Self::Fire,
        Self::RockPaperScissors,
        Self::ForagingAnts,
        Self::LangtonsLoop,
        Self::SugarScape,
    ];

    /// Canonical name used by descriptor files.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::GameOfLife => "Game of Life",
            Self::Segregation => "Segregation",
            Self::PredatorPrey => "Predator Prey",
            Self::Fire => "Fire",
            Self::RockPaperScissors => "Rock Paper Scissors",
            Self::ForagingAnts => "Foraging Ants",
            Self::LangtonsLoop => "Langtons Loop",
            Self::SugarScape => "SugarScape",
        }
    }

    /// Resolves a descriptor name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Geometry of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellShape {
    /// Axis-aligned square cells.
    #[default]
    Square,
    /// Alternating up and down triangles. Requires even grid dimensions.
    Triangle,
}

impl CellShape {
    /// Lowercase identifier used by descriptor files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Triangle => "triangle",
        }
    }

    /// Parses a descriptor value, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Square, Self::Triangle]
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for CellShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour of the grid border when neighbors are looked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Cells beyond the border do not exist.
    #[default]
    Finite,
    /// The grid wraps around in both directions.
    Toroidal,
}

impl EdgePolicy {
    /// Lowercase identifier used by descriptor files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finite => "finite",
            Self::Toroidal => "toroidal",
        }
    }

    /// Parses a descriptor value, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        [Self::Finite, Self::Toroidal]
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of keys understood in a raw descriptor field map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorField {
    /// Simulation type name.
    SimulationName,
    /// Human readable title.
    Title,
    /// Author credit.
    Author,
    /// Cell shape.
    Shape,
    /// Edge policy.
    EdgeType,
    /// Grid-line visibility flag.
    GridLines,
    /// Number of columns.
    Cols,
    /// Number of rows.
    Rows,
    /// Encoded initial cell states.
    Configs,
    /// Encoded 3x3 neighbor offsets.
    Neighbors,
    /// Encoded color list.
    Colors,
    /// Free-form description.
    Description,
}

impl DescriptorField {
    /// Every field in the order descriptor files list them.
    pub const ALL: [DescriptorField; 12] = [
        Self::SimulationName,
        Self::Title,
        Self::Author,
        Self::Shape,
        Self::EdgeType,
        Self::GridLines,
        Self::Cols,
        Self::Rows,
        Self::Configs,
        Self::Neighbors,
        Self::Colors,
        Self::Description,
    ];

    /// Key spelling used in descriptor files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SimulationName => "simulationName",
            Self::Title => "title",
            Self::Author => "author",
            Self::Shape => "shape",
            Self::EdgeType => "edgeType",
            Self::GridLines => "gridLines",
            Self::Cols => "cols",
            Self::Rows => "rows",
            Self::Configs => "configs",
            Self::Neighbors => "neighbors",
            Self::Colors => "colors",
            Self::Description => "description",
        }
    }

    /// Looks up a field by its exact key spelling.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Reports whether a descriptor must supply the field.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(
            self,
            Self::SimulationName | Self::Cols | Self::Rows | Self::Neighbors | Self::Colors
        )
    }
}

impl fmt::Display for DescriptorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keys resolved through the [`MessageCatalog`] collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageKey {
    /// The simulation name is not recognized.
    InvalidSimName,
    /// Placeholder for a missing title.
    NoTitle,
    /// Placeholder for a missing author.
    NoAuthor,
    /// Triangle cells were requested with an odd dimension.
    OddValuesWhenTriangle,
    /// The column count is not usable.
    InvalidCols,
    /// The row count is not usable.
    InvalidRows,
    /// An encoded cell state is outside the rule's range.
    InvalidStates,
    /// The encoded states do not cover the grid exactly.
    InvalidCoordinates,
    /// More colors than states were supplied.
    TooManyColors,
    /// Fewer colors than states were supplied.
    TooFewColors,
    /// Placeholder for a missing description.
    NoDescription,
}

impl MessageKey {
    /// Every message key a complete bundle must define.
    pub const ALL: [MessageKey; 11] = [
        Self::InvalidSimName,
        Self::NoTitle,
        Self::NoAuthor,
        Self::OddValuesWhenTriangle,
        Self::InvalidCols,
        Self::InvalidRows,
        Self::InvalidStates,
        Self::InvalidCoordinates,
        Self::TooManyColors,
        Self::TooFewColors,
        Self::NoDescription,
    ];

    /// Identifier used in message bundles.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSimName => "InvalidSimName",
            Self::NoTitle => "NoTitle",
            Self::NoAuthor => "NoAuthor",
            Self::OddValuesWhenTriangle => "OddValuesWhenTriangle",
            Self::InvalidCols => "InvalidCols",
            Self::InvalidRows => "InvalidRows",
            Self::InvalidStates => "InvalidStates",
            Self::InvalidCoordinates => "InvalidCoordinates",
            Self::TooManyColors => "TooManyColors",
            Self::TooFewColors => "TooFewColors",
            Self::NoDescription => "NoDescription",
        }
    }

    /// Looks up a key by its bundle identifier.
    #[must_use]
    pub fn from_str_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense two-dimensional grid stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    columns: u32,
    rows: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Lays out a flat sequence row by row.
    ///
    /// The sequence must contain exactly `columns * rows` values; the row index
    /// advances slower than the column index.
    pub fn from_row_major(columns: u32, rows: u32, cells: Vec<T>) -> Result<Self, CodecError> {
        let expected = cell_count(columns, rows);
        if cells.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the value stored at the provided row and column.
    #[must_use]
    pub fn get(&self, row: u32, column: u32) -> Option<&T> {
        self.index(row, column)
            .and_then(|index| self.cells.get(index))
    }

    /// Returns a full row as a slice.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(row).ok()? * width;
        self.cells.get(start..start + width)
    }

    /// Iterator over every row from top to bottom.
    ///
    /// A zero-width grid yields one empty slice per row.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |row| self.row(row).unwrap_or_default())
    }

    /// Flat row-major view of every cell.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Consumes the grid, yielding the flat row-major cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Copies the grid into nested row vectors.
    #[must_use]
    pub fn to_nested(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        if row < self.rows && column < self.columns {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Number of cells contained in a grid with the provided dimensions.
#[must_use]
pub fn cell_count(columns: u32, rows: u32) -> usize {
    usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(usize::MAX)
}

/// Capabilities reported by the rule engine for a simulation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleProfile {
    num_states: NonZeroU32,
}

impl RuleProfile {
    /// Creates a profile for a rule with the provided number of states.
    #[must_use]
    pub const fn new(num_states: NonZeroU32) -> Self {
        Self { num_states }
    }

    /// Creates a profile from a plain count. Returns `None` for zero states.
    #[must_use]
    pub const fn with_states(num_states: u32) -> Option<Self> {
        match NonZeroU32::new(num_states) {
            Some(num_states) => Some(Self { num_states }),
            None => None,
        }
    }

    /// Number of distinct cell states the rule supports.
    #[must_use]
    pub const fn num_states(&self) -> u32 {
        self.num_states.get()
    }

    /// Number of states as a non-zero count.
    #[must_use]
    pub const fn state_count(&self) -> NonZeroU32 {
        self.num_states
    }
}

/// Resolves rule capabilities for a simulation type.
pub trait RuleCatalog {
    /// Returns the profile of the rule behind `kind`, if the engine provides one.
    fn resolve(&self, kind: SimulationKind) -> Option<RuleProfile>;
}

/// Localized message lookup keyed by [`MessageKey`].
pub trait MessageCatalog {
    /// Identifier of the bundle the messages were loaded from.
    fn locale(&self) -> &str;

    /// Human readable text for `key`.
    fn message(&self, key: MessageKey) -> &str;
}

/// Failures raised while turning encoded text into a grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A token could not be parsed as an integer.
    #[error("token `{token}` at position {position} is not an integer")]
    MalformedEncoding {
        /// Offending token with surrounding whitespace removed.
        token: String,
        /// Zero-based position of the token in the sequence.
        position: usize,
    },
    /// The number of values does not match the grid dimensions.
    #[error("expected {expected} values but found {found}")]
    SizeMismatch {
        /// Number of values required by the grid dimensions.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
}

/// Reasons a single descriptor field fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The simulation name is not part of the recognized set.
    #[error("`{name}` is not a recognized simulation")]
    InvalidSimName {
        /// Name supplied by the descriptor.
        name: String,
    },
    /// The column count is zero or negative.
    #[error("column count {value} must be positive")]
    InvalidCols {
        /// Column count supplied by the descriptor.
        value: i64,
    },
    /// The row count is zero or negative.
    #[error("row count {value} must be positive")]
    InvalidRows {
        /// Row count supplied by the descriptor.
        value: i64,
    },
    /// An encoded cell state is not a valid state of the rule.
    #[error("cell state `{value}` is outside 0..{num_states}")]
    InvalidStates {
        /// Offending encoded value.
        value: String,
        /// Number of states the rule supports.
        num_states: u32,
    },
    /// The encoded states do not cover every cell exactly once.
    #[error("expected {expected} encoded cell states but found {found}")]
    InvalidCoordinates {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of encoded states supplied.
        found: usize,
    },
    /// Triangle cells require even dimensions.
    #[error("triangle cells need even dimensions, got {rows} rows and {columns} columns")]
    OddValuesWhenTriangle {
        /// Validated row count.
        rows: u32,
        /// Validated column count.
        columns: u32,
    },
    /// More colors than the rule has states.
    #[error("expected {expected} colors but found {found}")]
    TooManyColors {
        /// Number of states the rule supports.
        expected: u32,
        /// Number of colors supplied.
        found: usize,
    },
    /// Fewer colors than the rule has states.
    #[error("expected {expected} colors but found {found}")]
    TooFewColors {
        /// Number of states the rule supports.
        expected: u32,
        /// Number of colors supplied.
        found: usize,
    },
    /// The grid would hold more than [`MAX_CELL_COUNT`] cells.
    #[error("a {columns}x{rows} grid exceeds the limit of {limit} cells")]
    GridTooLarge {
        /// Validated column count.
        columns: u32,
        /// Validated row count.
        rows: u32,
        /// Largest permitted cell count.
        limit: usize,
    },
    /// A grid encoding could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ValidationError {
    /// Message key describing the failure, if it has a localized message.
    #[must_use]
    pub const fn message_key(&self) -> Option<MessageKey> {
        match self {
            Self::InvalidSimName { .. } => Some(MessageKey::InvalidSimName),
            Self::InvalidCols { .. } => Some(MessageKey::InvalidCols),
            Self::InvalidRows { .. } => Some(MessageKey::InvalidRows),
            Self::InvalidStates { .. } => Some(MessageKey::InvalidStates),
            Self::InvalidCoordinates { .. } => Some(MessageKey::InvalidCoordinates),
            Self::OddValuesWhenTriangle { .. } => Some(MessageKey::OddValuesWhenTriangle),
            Self::TooManyColors { .. } => Some(MessageKey::TooManyColors),
            Self::TooFewColors { .. } => Some(MessageKey::TooFewColors),
            Self::GridTooLarge { .. } | Self::Codec(_) => None,
        }
    }
}

/// Failures surfaced to callers configuring a simulation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field failed validation. `message` is the localized explanation.
    #[error("{message}")]
    Invalid {
        /// Typed reason for the failure.
        #[source]
        error: ValidationError,
        /// Localized text resolved through the message catalog.
        message: String,
    },
    /// The rule engine has no rule for a recognized simulation type.
    #[error("no rule is registered for simulation `{name}`")]
    UnknownRuleType {
        /// Simulation name that failed to resolve.
        name: String,
    },
    /// A required field is absent from the raw field map.
    #[error("required field `{0}` is missing")]
    MissingField(DescriptorField),
    /// An integer field holds text that is not an integer.
    #[error("field `{field}` must be an integer, got `{value}`")]
    NotAnInteger {
        /// Field holding the value.
        field: DescriptorField,
        /// Raw text supplied for the field.
        value: String,
    },
}

impl ConfigError {
    /// Wraps a validation failure, resolving its message through `messages`.
    ///
    /// Failures without a message key fall back to their own description.
    #[must_use]
    pub fn localized(error: ValidationError, messages: &dyn MessageCatalog) -> Self {
        let message = match error.message_key() {
            Some(key) => messages.message(key).to_owned(),
            None => error.to_string(),
        };
        Self::Invalid { error, message }
    }

    /// Typed validation failure, if this error came from a field validator.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }
}
