//! Exact-versus-simulated absorption analysis.

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use chainval_chain::TransitionMatrix;

use crate::config::AbsorptionConfig;
use crate::error::AbsorptionError;
use crate::exact::{ExactAbsorption, absorption_probabilities};
use crate::partition::StatePartition;
use crate::simulate::{SimulatedAbsorption, simulate_absorption};

/// Result of one absorption analysis: exact and simulated probabilities over
/// the same (transient x absorbing) grid.
#[derive(Debug, Clone)]
pub struct AbsorptionAnalysis {
    partition: StatePartition,
    exact: ExactAbsorption,
    simulated: SimulatedAbsorption,
    seed: u64,
}

impl AbsorptionAnalysis {
    /// The partition the result is laid out by.
    pub fn partition(&self) -> &StatePartition {
        &self.partition
    }

    /// Exact absorption probabilities (rows: transient, columns: absorbing).
    pub fn exact(&self) -> &Array2<f64> {
        self.exact.probabilities()
    }

    /// Simulated absorption probabilities, same layout as [`Self::exact`].
    pub fn simulated(&self) -> &Array2<f64> {
        self.simulated.probabilities()
    }

    /// Fundamental matrix `(I - Q)^-1`.
    pub fn fundamental(&self) -> &Array2<f64> {
        self.exact.fundamental()
    }

    /// Expected steps before absorption from each transient state.
    pub fn expected_steps(&self) -> &Array1<f64> {
        self.exact.expected_steps()
    }

    /// Raw terminal-state counts behind [`Self::simulated`].
    pub fn counts(&self) -> &Array2<u64> {
        self.simulated.counts()
    }

    /// Trajectories simulated per transient state.
    pub fn n_trajectories(&self) -> usize {
        self.simulated.n_trajectories()
    }

    /// Seed the simulation was run with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 1-indexed transient state labels, in row order.
    pub fn transient_labels(&self) -> Vec<usize> {
        self.partition.transient().iter().map(|s| s.label()).collect()
    }

    /// 1-indexed absorbing state labels, in column order.
    pub fn absorbing_labels(&self) -> Vec<usize> {
        self.partition.absorbing().iter().map(|s| s.label()).collect()
    }
}

/// Computes absorption probabilities exactly and by simulation.
///
/// # Arguments
///
/// * `matrix` - Row-stochastic transition matrix.
/// * `absorbing` - 1-indexed absorbing states; fixes the column order.
/// * `transient` - 1-indexed transient states; fixes the row order.
/// * `config` - Seed, trajectory count and step cap.
///
/// # Errors
///
/// Returns [`AbsorptionError`] if the config or partition is invalid, if
/// `I - Q` is singular, or if a simulated trajectory times out. The exact
/// solve runs first, so a singular transient block is reported without
/// simulating.
#[tracing::instrument(
    skip_all,
    fields(
        n_states = matrix.n_states(),
        n_absorbing = absorbing.len(),
        n_transient = transient.len(),
        seed = config.seed()
    )
)]
pub fn analyze_absorption(
    matrix: &TransitionMatrix,
    absorbing: &[usize],
    transient: &[usize],
    config: &AbsorptionConfig,
) -> Result<AbsorptionAnalysis, AbsorptionError> {
    config.validate()?;
    let partition = StatePartition::new(matrix, absorbing, transient)?;
    analyze_partition(matrix, partition, config)
}

/// Like [`analyze_absorption`], with the partition inferred from unit
/// self-transitions via [`StatePartition::infer`].
#[tracing::instrument(skip_all, fields(n_states = matrix.n_states(), seed = config.seed()))]
pub fn analyze_absorption_inferred(
    matrix: &TransitionMatrix,
    config: &AbsorptionConfig,
) -> Result<AbsorptionAnalysis, AbsorptionError> {
    config.validate()?;
    let partition = StatePartition::infer(matrix)?;
    analyze_partition(matrix, partition, config)
}

fn analyze_partition(
    matrix: &TransitionMatrix,
    partition: StatePartition,
    config: &AbsorptionConfig,
) -> Result<AbsorptionAnalysis, AbsorptionError> {
    let exact = absorption_probabilities(matrix, &partition)?;
    debug!("exact absorption probabilities computed");

    let mut rng = StdRng::seed_from_u64(config.seed());
    let simulated = simulate_absorption(
        matrix,
        &partition,
        config.n_trajectories(),
        config.max_steps(),
        &mut rng,
    )?;

    let max_diff = (simulated.probabilities() - exact.probabilities())
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()));
    debug!(
        n_trajectories = config.n_trajectories(),
        max_abs_difference = max_diff,
        "absorption simulation complete"
    );

    Ok(AbsorptionAnalysis {
        partition,
        exact,
        simulated,
        seed: config.seed(),
    })
}
