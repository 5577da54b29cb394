//! Stationary distributions of ergodic Markov chains.
//!
//! Three independent estimates of the same distribution `π = πP`:
//!
//! | Method | Function | Nature |
//! |--------|----------|--------|
//! | Eigenvector of `Pᵀ` for eigenvalue 1 | [`eigen_stationary`] | exact |
//! | Column of `(Pᵀ)^k` | [`power_stationary`] | exact as `k → ∞` |
//! | Visit frequencies of simulated paths | [`simulate_occupancy`] | Monte Carlo |
//!
//! [`analyze_stationary`] runs all three with one [`StationaryConfig`].
//!
//! # Quick start
//!
//! ```rust
//! use chainval_chain::TransitionMatrix;
//! use chainval_stationary::{StationaryConfig, analyze_stationary};
//!
//! let matrix = TransitionMatrix::from_rows(&[[0.7, 0.3], [0.1, 0.9]]).unwrap();
//! let analysis = analyze_stationary(&matrix, &StationaryConfig::new()).unwrap();
//!
//! assert!((analysis.exact_eigen()[1] - 0.75).abs() < 1e-9);
//! assert!((analysis.exact_power()[1] - 0.75).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod config;
pub mod eigen;
pub mod error;
pub mod power;
pub mod simulate;

pub use analysis::{StationaryAnalysis, analyze_stationary};
pub use config::{InitialDistribution, StationaryConfig};
pub use eigen::{EigenStationary, EigenvalueWarning, eigen_stationary};
pub use error::StationaryError;
pub use power::{matrix_power, power_stationary};
pub use simulate::{SimulatedOccupancy, simulate_occupancy};
