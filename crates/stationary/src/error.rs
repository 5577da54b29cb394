//! Error types for the chainval-stationary crate.

/// Error type for all fallible operations in the chainval-stationary crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StationaryError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the Schur iteration on `Pᵀ` does not converge.
    #[error("eigendecomposition failed to converge")]
    EigenDecompositionFailed,

    /// Returned when the eigenvector for the selected eigenvalue sums to
    /// zero and cannot be normalized to a distribution.
    #[error("eigenvector for eigenvalue {eigenvalue} cannot be normalized (sums to zero)")]
    DegenerateEigenvector {
        /// Real part of the selected eigenvalue.
        eigenvalue: f64,
    },

    /// Chain error.
    #[error(transparent)]
    Chain(#[from] chainval_chain::ChainError),
}
