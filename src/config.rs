use serde::{Deserialize, Serialize};

/// Settings for a [`Runner`](crate::Runner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Maximum number of single-step reductions before giving up.
    /// `None` runs until the program finishes.
    pub step_limit: Option<u64>,
    /// Emit a trace event for every single-step reduction.
    pub trace_steps: bool,
}

impl RunnerConfig {
    /// Unbounded, with per-step tracing off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most `limit` single-step reductions.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Turn the per-step trace event on or off.
    pub fn with_step_tracing(mut self, enabled: bool) -> Self {
        self.trace_steps = enabled;
        self
    }
}
