//! Literal example chains run by the subcommands.

use chainval_chain::{ChainError, TransitionMatrix};

/// Absorbing states of [`absorbing_chain`], 1-indexed.
pub const ABSORBING: [usize; 2] = [1, 4];

/// Transient states of [`absorbing_chain`], 1-indexed.
pub const TRANSIENT: [usize; 2] = [2, 3];

/// A 4-state chain absorbed in state 1 or state 4.
pub fn absorbing_chain() -> Result<TransitionMatrix, ChainError> {
    TransitionMatrix::from_rows(&[
        [1.0, 0.0, 0.0, 0.0],
        [0.2, 0.2, 0.2, 0.4],
        [0.25, 0.25, 0.25, 0.25],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// A 4-state chain with every transition possible.
pub fn ergodic_chain() -> Result<TransitionMatrix, ChainError> {
    TransitionMatrix::from_rows(&[
        [0.3, 0.3, 0.2, 0.2],
        [0.4, 0.3, 0.2, 0.1],
        [0.3, 0.1, 0.2, 0.4],
        [0.1, 0.1, 0.1, 0.7],
    ])
}
