//! Error types for the chainval-chain crate.

/// Error type for all fallible operations in the chainval-chain crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// Returned when the transition matrix has no states.
    #[error("transition matrix is empty")]
    EmptyMatrix,

    /// Returned when the transition matrix is not square, has negative or
    /// non-finite entries, or has a row that does not sum to 1.
    #[error("invalid transition matrix: {reason}")]
    InvalidMatrix {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a 1-indexed state label is outside `1..=n_states`.
    #[error("state {state} out of range (must be 1..={n_states})")]
    StateOutOfRange {
        /// The offending 1-indexed label.
        state: usize,
        /// Number of states in the chain.
        n_states: usize,
    },

    /// Returned when a probability vector is malformed.
    #[error("invalid distribution: {reason}")]
    InvalidDistribution {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}
