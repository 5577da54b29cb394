//! Exact-versus-simulated stationary analysis.

use nalgebra::Complex;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use chainval_chain::TransitionMatrix;

use crate::config::StationaryConfig;
use crate::eigen::{EigenStationary, EigenvalueWarning, eigen_stationary};
use crate::error::StationaryError;
use crate::power::power_stationary;
use crate::simulate::{SimulatedOccupancy, simulate_occupancy};

/// Result of one stationary analysis: two exact estimates and one simulated
/// estimate of the same distribution.
#[derive(Debug, Clone)]
pub struct StationaryAnalysis {
    eigen: EigenStationary,
    power: Array1<f64>,
    simulated: SimulatedOccupancy,
    power_exponent: u32,
    seed: u64,
}

impl StationaryAnalysis {
    /// Stationary distribution from the eigenvector of `Pᵀ`.
    pub fn exact_eigen(&self) -> &Array1<f64> {
        self.eigen.distribution()
    }

    /// Stationary distribution from column 0 of `(Pᵀ)^k`.
    pub fn exact_power(&self) -> &Array1<f64> {
        &self.power
    }

    /// Visit frequencies from the simulated trajectories.
    pub fn simulated(&self) -> &Array1<f64> {
        self.simulated.frequencies()
    }

    /// Every eigenvalue of `Pᵀ`.
    pub fn eigenvalues(&self) -> &[Complex<f64>] {
        self.eigen.eigenvalues()
    }

    /// The eigenvalue whose eigenvector gave [`Self::exact_eigen`].
    pub fn selected_eigenvalue(&self) -> Complex<f64> {
        self.eigen.selected_eigenvalue()
    }

    /// Present when the selected eigenvalue was not within tolerance of 1.
    pub fn eigenvalue_warning(&self) -> Option<&EigenvalueWarning> {
        self.eigen.warning()
    }

    /// Raw visit counts behind [`Self::simulated`].
    pub fn counts(&self) -> &[u64] {
        self.simulated.counts()
    }

    /// 1-indexed start state of each trajectory.
    pub fn start_labels(&self) -> Vec<usize> {
        self.simulated
            .start_states()
            .iter()
            .map(|s| s.label())
            .collect()
    }

    /// Total number of counted observations.
    pub fn n_observations(&self) -> u64 {
        self.simulated.n_observations()
    }

    /// Exponent used by the power method.
    pub fn power_exponent(&self) -> u32 {
        self.power_exponent
    }

    /// Seed the simulation was run with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Computes the stationary distribution by eigendecomposition, by matrix
/// power, and by simulation.
///
/// Ergodicity is assumed, not verified; a selected eigenvalue further than
/// `config.eigen_tolerance()` from 1 is reported through
/// [`StationaryAnalysis::eigenvalue_warning`] rather than as an error.
///
/// # Errors
///
/// Returns [`StationaryError`] if the config or initial distribution is
/// invalid, or if the eigendecomposition fails.
#[tracing::instrument(
    skip_all,
    fields(
        n_states = matrix.n_states(),
        n_trajectories = config.n_trajectories(),
        trajectory_length = config.trajectory_length(),
        seed = config.seed()
    )
)]
pub fn analyze_stationary(
    matrix: &TransitionMatrix,
    config: &StationaryConfig,
) -> Result<StationaryAnalysis, StationaryError> {
    config.validate()?;
    let initial = config.initial_distribution().resolve(matrix.n_states())?;

    let eigen = eigen_stationary(matrix, config.eigen_tolerance())?;
    debug!(
        eigenvalue = %eigen.selected_eigenvalue(),
        "eigenvector stationary distribution computed"
    );

    let power = power_stationary(matrix, config.power_exponent());

    let mut rng = StdRng::seed_from_u64(config.seed());
    let simulated = simulate_occupancy(
        matrix,
        &initial,
        config.n_trajectories(),
        config.trajectory_length(),
        &mut rng,
    )?;

    let max_diff = (simulated.frequencies() - eigen.distribution())
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()));
    debug!(
        n_observations = simulated.n_observations(),
        max_abs_difference = max_diff,
        "stationary simulation complete"
    );

    Ok(StationaryAnalysis {
        eigen,
        power,
        simulated,
        power_exponent: config.power_exponent(),
        seed: config.seed(),
    })
}
