//! Finite discrete-time Markov chains: the shared input of every analysis.
//!
//! This crate owns the validated [`TransitionMatrix`], the 1-indexed
//! [`StateId`] label used at every public boundary, and the sampling
//! primitives the simulators are built on.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  transition   │────▶│  distribution  │────▶│    simulate      │
//!  │  (validate P) │     │  (draw index)  │     │  (draw states)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use chainval_chain::{StateId, TransitionMatrix};
//!
//! let matrix = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.5, 0.5]]).unwrap();
//! let first = StateId::new(1, matrix.n_states()).unwrap();
//! assert!((matrix.prob(first, first).unwrap() - 0.9).abs() < 1e-12);
//!
//! // A state checked against a bigger chain is an error, not a panic.
//! let stranger = StateId::new(3, 3).unwrap();
//! assert!(matrix.row(stranger).is_err());
//!
//! // Rows that don't sum to 1 are rejected up front.
//! assert!(TransitionMatrix::from_rows(&[[0.9, 0.2], [0.5, 0.5]]).is_err());
//! ```

pub mod distribution;
pub mod error;
pub mod simulate;
pub mod state;
pub mod transition;

pub use distribution::{PROBABILITY_SUM_TOLERANCE, sample_categorical, validate_distribution};
pub use error::ChainError;
pub use simulate::{simulate_path, simulate_path_into};
pub use state::StateId;
pub use transition::TransitionMatrix;
