//! Report error types.

/// Errors that can occur while building or rendering a report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    /// Exact and simulated results have different shapes.
    #[error("shape mismatch: exact is {exact:?}, simulated is {simulated:?}")]
    ShapeMismatch {
        exact: (usize, usize),
        simulated: (usize, usize),
    },

    /// A label list does not match the axis it labels.
    #[error("{axis} labels: expected {expected}, got {got}")]
    LabelMismatch {
        axis: &'static str,
        expected: usize,
        got: usize,
    },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
