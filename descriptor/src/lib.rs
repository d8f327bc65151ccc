#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation descriptor aggregate for Cell Society.
//!
//! A [`SimulationDescriptor`] is built once from raw or typed fields and never
//! mutated afterwards. Each accessor validates its field on demand, so a caller
//! that never reads an invalid field never observes its failure. Callers that
//! prefer a single failure surface use [`SimulationDescriptor::validate`],
//! which resolves every field in a fixed order and yields a
//! [`ValidatedSimulation`] ready for the engine.

use std::{fmt, sync::Arc};

use cell_society_core::{
    CellShape, ConfigError, EdgePolicy, Grid, MessageCatalog, RuleCatalog, RuleProfile,
    SimulationKind, ValidationError,
};
use cell_society_system_validation as validate;
use rand::Rng;
use tracing::debug;

mod raw;

pub use raw::{DescriptorFields, RawDescriptor};

/// Name printed in front of the diagnostic field dump.
pub const DATA_TYPE: &str = "Simulation";

/// Shared message lookup handed to descriptors.
pub type SharedMessages = Arc<dyn MessageCatalog + Send + Sync>;

/// Immutable, lazily validated simulation configuration.
pub struct SimulationDescriptor {
    fields: DescriptorFields,
    rule: Option<RuleProfile>,
    messages: SharedMessages,
    raw: RawDescriptor,
}

impl SimulationDescriptor {
    /// Creates a descriptor from typed fields.
    ///
    /// The rule profile is resolved immediately. A recognized simulation name
    /// without a registered rule fails with [`ConfigError::UnknownRuleType`];
    /// an unrecognized name is kept and reported by the accessors.
    pub fn new(
        fields: DescriptorFields,
        rules: &dyn RuleCatalog,
        messages: SharedMessages,
    ) -> Result<Self, ConfigError> {
        let raw = fields.to_raw();
        Self::assemble(fields, raw, rules, messages)
    }

    /// Creates a descriptor from a raw field map, keeping the map for diagnostics.
    ///
    /// Missing required keys and non-integer dimensions are rejected here,
    /// before any field is validated.
    pub fn from_raw(
        raw: RawDescriptor,
        rules: &dyn RuleCatalog,
        messages: SharedMessages,
    ) -> Result<Self, ConfigError> {
        let fields = DescriptorFields::try_from(&raw)?;
        Self::assemble(fields, raw, rules, messages)
    }

    fn assemble(
        fields: DescriptorFields,
        raw: RawDescriptor,
        rules: &dyn RuleCatalog,
        messages: SharedMessages,
    ) -> Result<Self, ConfigError> {
        let rule = match SimulationKind::from_name(&fields.simulation_name) {
            Some(kind) => Some(rules.resolve(kind).ok_or_else(|| {
                ConfigError::UnknownRuleType {
                    name: fields.simulation_name.clone(),
                }
            })?),
            None => {
                debug!(
                    name = %fields.simulation_name,
                    "simulation name not recognized, rule left unresolved"
                );
                None
            }
        };

        Ok(Self {
            fields,
            rule,
            messages,
            raw,
        })
    }

    fn localize(&self, error: ValidationError) -> ConfigError {
        ConfigError::localized(error, self.messages.as_ref())
    }

    /// Simulation name exactly as supplied, once it is known to be recognized.
    pub fn simulation_name(&self) -> Result<&str, ConfigError> {
        let _ = self.simulation_kind()?;
        Ok(&self.fields.simulation_name)
    }

    /// Recognized simulation type.
    pub fn simulation_kind(&self) -> Result<SimulationKind, ConfigError> {
        validate::simulation_kind(&self.fields.simulation_name)
            .map_err(|error| self.localize(error))
    }

    /// Rule profile resolved at construction.
    pub fn rule(&self) -> Result<RuleProfile, ConfigError> {
        match self.rule {
            Some(rule) => Ok(rule),
            None => Err(self.localize(ValidationError::InvalidSimName {
                name: self.fields.simulation_name.clone(),
            })),
        }
    }

    /// Title, or the localized placeholder.
    #[must_use]
    pub fn title(&self) -> String {
        validate::title(self.fields.title.as_deref(), self.messages.as_ref())
    }

    /// Author, or the localized placeholder.
    #[must_use]
    pub fn author(&self) -> String {
        validate::author(self.fields.author.as_deref(), self.messages.as_ref())
    }

    /// Description, or the localized placeholder.
    #[must_use]
    pub fn description(&self) -> String {
        validate::description(self.fields.description.as_deref(), self.messages.as_ref())
    }

    /// Cell shape; triangle cells fail on odd dimensions.
    ///
    /// Rows and columns are only read for triangle cells.
    pub fn shape(&self) -> Result<CellShape, ConfigError> {
        validate::shape(self.fields.shape.as_deref(), || {
            let rows = validate::rows(self.fields.rows)?;
            let columns = validate::columns(self.fields.columns)?;
            Ok((rows, columns))
        })
        .map_err(|error| self.localize(error))
    }

    /// Edge policy, defaulting to finite.
    #[must_use]
    pub fn edge_policy(&self) -> EdgePolicy {
        validate::edge_policy(self.fields.edge_type.as_deref())
    }

    /// Whether grid lines are drawn.
    #[must_use]
    pub fn grid_lines(&self) -> bool {
        validate::grid_lines(self.fields.grid_lines)
    }

    /// Number of columns.
    pub fn columns(&self) -> Result<u32, ConfigError> {
        validate::columns(self.fields.columns).map_err(|error| self.localize(error))
    }

    /// Number of rows.
    pub fn rows(&self) -> Result<u32, ConfigError> {
        validate::rows(self.fields.rows).map_err(|error| self.localize(error))
    }

    /// Initial cell states, synthesized from `rng` when none were encoded.
    pub fn initial_states<R>(&self, rng: &mut R) -> Result<Grid<i32>, ConfigError>
    where
        R: Rng + ?Sized,
    {
        let rule = self.rule()?;
        let columns = self.columns()?;
        let rows = self.rows()?;
        validate::initial_states(self.fields.configs.as_deref(), columns, rows, rule, rng)
            .map_err(|error| self.localize(error))
    }

    /// Initial cell states drawn from the thread-local random source when needed.
    pub fn configs(&self) -> Result<Grid<i32>, ConfigError> {
        self.initial_states(&mut rand::thread_rng())
    }

    /// 3x3 neighbor offset grid.
    pub fn neighbor_offsets(&self) -> Result<Grid<i32>, ConfigError> {
        validate::neighbor_offsets(&self.fields.neighbors).map_err(|error| self.localize(error))
    }

    /// Colors aligned with rule state indices.
    pub fn colors(&self) -> Result<Vec<String>, ConfigError> {
        let rule = self.rule()?;
        validate::colors(&self.fields.colors, rule).map_err(|error| self.localize(error))
    }

    /// Raw field map retained for diagnostics.
    #[must_use]
    pub fn raw(&self) -> &RawDescriptor {
        &self.raw
    }

    /// Identifier of the message bundle used for placeholders and failures.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.messages.locale()
    }

    /// Validates every field and returns the first failure encountered.
    ///
    /// Fields are resolved in the order: simulation name, rows, columns,
    /// shape, initial states, neighbor offsets, colors.
    pub fn validate<R>(&self, rng: &mut R) -> Result<ValidatedSimulation, ConfigError>
    where
        R: Rng + ?Sized,
    {
        let kind = self.simulation_kind()?;
        let rows = self.rows()?;
        let columns = self.columns()?;
        let shape = self.shape()?;
        let initial_states = self.initial_states(rng)?;
        let neighbor_offsets = self.neighbor_offsets()?;
        let colors = self.colors()?;

        debug!(simulation = %kind, rows, columns, %shape, "validated simulation descriptor");
        Ok(ValidatedSimulation {
            kind,
            title: self.title(),
            author: self.author(),
            description: self.description(),
            shape,
            edge_policy: self.edge_policy(),
            grid_lines: self.grid_lines(),
            rows,
            columns,
            initial_states,
            neighbor_offsets,
            colors,
        })
    }
}

impl fmt::Debug for SimulationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationDescriptor")
            .field("fields", &self.fields)
            .field("rule", &self.rule)
            .field("locale", &self.messages.locale())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SimulationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DATA_TYPE} {{")?;
        for (key, value) in self.raw.iter() {
            writeln!(f, "  {key}='{value}',")?;
        }
        writeln!(f, "}}")
    }
}

/// Fully validated configuration consumed by the simulation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedSimulation {
    /// Recognized simulation type.
    pub kind: SimulationKind,
    /// Title or localized placeholder.
    pub title: String,
    /// Author or localized placeholder.
    pub author: String,
    /// Description or localized placeholder.
    pub description: String,
    /// Cell geometry.
    pub shape: CellShape,
    /// Border behaviour.
    pub edge_policy: EdgePolicy,
    /// Whether grid lines are drawn.
    pub grid_lines: bool,
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub columns: u32,
    /// Initial state of every cell.
    pub initial_states: Grid<i32>,
    /// 3x3 neighbor offset grid.
    pub neighbor_offsets: Grid<i32>,
    /// One color per rule state, indexed by state.
    pub colors: Vec<String>,
}

impl ValidatedSimulation {
    /// Color assigned to `state`, if the state exists.
    #[must_use]
    pub fn color_for(&self, state: i32) -> Option<&str> {
        usize::try_from(state)
            .ok()
            .and_then(|index| self.colors.get(index))
            .map(String::as_str)
    }
}
