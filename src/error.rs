use thiserror::Error;

/// Errors reported by bounded reduction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    /// The program was still running when the step budget ran out.
    #[error("Step limit of {limit} reached before the program produced a value")]
    StepLimitExceeded {
        /// The configured maximum number of single-step reductions.
        limit: u64,
    },
}

/// Result type for bounded reduction
pub type Result<T> = std::result::Result<T, ReductionError>;
