//! Error types for the chainval-absorption crate.

/// Error type for all fallible operations in the chainval-absorption crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AbsorptionError {
    /// Returned when the absorbing/transient partition is malformed.
    #[error("invalid partition: {reason}")]
    InvalidPartition {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when `I - Q` cannot be inverted, i.e. some transient state
    /// is not absorbed with probability 1.
    #[error("I - Q is singular: the transient block is not eventually absorbed")]
    SingularMatrix,

    /// Returned when a simulated trajectory exceeds the step cap without
    /// reaching an absorbing state.
    #[error("trajectory from state {start} not absorbed within {max_steps} steps")]
    TrajectoryTimeout {
        /// 1-indexed start state of the trajectory.
        start: usize,
        /// The configured step cap.
        max_steps: usize,
    },

    /// Chain error.
    #[error(transparent)]
    Chain(#[from] chainval_chain::ChainError),
}
