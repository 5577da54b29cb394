//! Absorption probabilities of absorbing Markov chains.
//!
//! Given a transition matrix whose states are split into absorbing sinks and
//! transient states, this crate computes the probability of ending in each
//! sink from each transient state twice: exactly, through the fundamental
//! matrix, and empirically, by simulating random walks until absorption.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  partition    │────▶│  exact         │────▶│    simulate      │
//!  │  (Q, R split) │     │  (N = (I-Q)^-1)│     │  (walk to sink)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use chainval_absorption::{AbsorptionConfig, analyze_absorption};
//! use chainval_chain::TransitionMatrix;
//!
//! let matrix = TransitionMatrix::from_rows(&[
//!     [1.0, 0.0, 0.0, 0.0],
//!     [0.2, 0.2, 0.2, 0.4],
//!     [0.25, 0.25, 0.25, 0.25],
//!     [0.0, 0.0, 0.0, 1.0],
//! ])
//! .unwrap();
//!
//! let config = AbsorptionConfig::new().with_n_trajectories(1_000);
//! let analysis = analyze_absorption(&matrix, &[1, 4], &[2, 3], &config).unwrap();
//!
//! // From state 2, absorption into state 1 has probability 4/11.
//! assert!((analysis.exact()[[0, 0]] - 4.0 / 11.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod exact;
pub mod partition;
pub mod simulate;

pub use analysis::{AbsorptionAnalysis, analyze_absorption, analyze_absorption_inferred};
pub use config::AbsorptionConfig;
pub use error::AbsorptionError;
pub use exact::{ExactAbsorption, absorption_probabilities, fundamental_matrix};
pub use partition::StatePartition;
pub use simulate::{SimulatedAbsorption, simulate_absorption};
