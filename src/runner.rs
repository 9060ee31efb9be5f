// Bounded reduction
//
// The core reducer is total and will happily diverge on an unbounded program.
// Runner drives the same state machine but counts single-step reductions and
// stops with StepLimitExceeded once the configured budget is spent.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace, warn};

use crate::config::RunnerConfig;
use crate::error::{ReductionError, Result};
use crate::reducer::Reduction;
use crate::signature::CommandSet;
use crate::tree::{Interpreter, Program};

/// Counters collected during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionStats {
    /// Single-step reductions performed.
    pub steps: u64,
}

/// The combined result of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<C> {
    /// What the combining function made of the value and final annotation.
    pub value: C,
    /// Counters for the run that produced it.
    pub stats: ReductionStats,
}

/// Drives reductions under a [`RunnerConfig`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    /// A runner using `config`.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// The settings this runner was built with.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Reduce `program` against `interpreter` and combine the value with the
    /// final annotation, failing if the step limit runs out first.
    ///
    /// A program of `n` commands succeeds under any limit of at least `n`.
    /// When the limit is hit the unreduced rest of the program is dropped
    /// before the error is returned.
    pub fn run<S, A, B, C, F>(
        &self,
        program: Program<S, A>,
        interpreter: Interpreter<S, B>,
        combine: F,
    ) -> Result<Outcome<C>>
    where
        S: CommandSet,
        F: FnOnce(A, B) -> C,
    {
        let span = debug_span!("run", limit = ?self.config.step_limit);
        let _enter = span.enter();

        let mut reduction = Reduction::new(program, interpreter);
        let mut stats = ReductionStats::default();
        loop {
            match reduction {
                Reduction::Terminal { value, state } => {
                    debug!(steps = stats.steps, "run: finished");
                    return Ok(Outcome {
                        value: combine(value, state),
                        stats,
                    });
                }
                running => {
                    if let Some(limit) = self.config.step_limit {
                        if stats.steps >= limit {
                            warn!(limit, "run: step limit exceeded");
                            return Err(ReductionError::StepLimitExceeded { limit });
                        }
                    }
                    reduction = running.step();
                    stats.steps += 1;
                    if self.config.trace_steps {
                        trace!(steps = stats.steps, "run: step");
                    }
                }
            }
        }
    }
}
