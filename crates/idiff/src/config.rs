use serde::{Deserialize, Serialize};

/// What the engine does when a comparison closes a cycle, i.e. reaches a
/// record or reference pair that is already being compared further up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Treat the revisited pair as equal. Differences inside the cycle are
    /// still reported once, on the first pass.
    #[default]
    AssumeEqual,
    /// Record a `Modified` entry at the path where the cycle closes.
    Report,
}

/// Configuration for a diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Handling of self-referential structures.
    pub cycle_policy: CyclePolicy,
}

impl DiffConfig {
    /// A configuration that reports every closed cycle.
    pub fn reporting_cycles() -> Self {
        Self {
            cycle_policy: CyclePolicy::Report,
        }
    }
}
