#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Built-in rule catalog reporting the state count of every bundled rule.

use std::{collections::BTreeMap, num::NonZeroU32};

use cell_society_core::{RuleCatalog, RuleProfile, SimulationKind};

const fn states(count: u32) -> RuleProfile {
    match NonZeroU32::new(count) {
        Some(count) => RuleProfile::new(count),
        None => panic!("rules need at least one state"),
    }
}

const BUILTIN_RULES: [(SimulationKind, RuleProfile); 8] = [
    // dead, alive
    (SimulationKind::GameOfLife, states(2)),
    // empty, group a, group b
    (SimulationKind::Segregation, states(3)),
    // water, fish, shark
    (SimulationKind::PredatorPrey, states(3)),
    // empty, tree, burning
    (SimulationKind::Fire, states(3)),
    // rock, paper, scissors
    (SimulationKind::RockPaperScissors, states(3)),
    // ground, nest, food, ant
    (SimulationKind::ForagingAnts, states(4)),
    (SimulationKind::LangtonsLoop, states(8)),
    // sugar levels 0 through 4
    (SimulationKind::SugarScape, states(5)),
];

/// Rule catalog backed by an in-memory table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    profiles: BTreeMap<SimulationKind, RuleProfile>,
}

impl RuleTable {
    /// Creates a table without any registered rules.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table holding every rule shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN_RULES.into_iter().collect(),
        }
    }

    /// Registers `profile` for `kind`, returning the profile it replaced.
    pub fn register(&mut self, kind: SimulationKind, profile: RuleProfile) -> Option<RuleProfile> {
        self.profiles.insert(kind, profile)
    }

    /// Removes the rule registered for `kind`.
    pub fn unregister(&mut self, kind: SimulationKind) -> Option<RuleProfile> {
        self.profiles.remove(&kind)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Reports whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl RuleCatalog for RuleTable {
    fn resolve(&self, kind: SimulationKind) -> Option<RuleProfile> {
        self.profiles.get(&kind).copied()
    }
}
