//! Monte Carlo estimation of absorption probabilities.

use ndarray::Array2;

use chainval_chain::TransitionMatrix;

use crate::error::AbsorptionError;
use crate::partition::StatePartition;

/// Tallied outcome of the absorption simulation.
#[derive(Debug, Clone)]
pub struct SimulatedAbsorption {
    counts: Array2<u64>,
    probabilities: Array2<f64>,
    n_trajectories: usize,
}

impl SimulatedAbsorption {
    /// Number of trajectories from each transient state (row) that ended in
    /// each absorbing state (column).
    pub fn counts(&self) -> &Array2<u64> {
        &self.counts
    }

    /// Empirical absorption probabilities, `counts / n_trajectories`.
    pub fn probabilities(&self) -> &Array2<f64> {
        &self.probabilities
    }

    /// Number of trajectories simulated from each transient state.
    pub fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }
}

/// Simulates absorption from every transient state.
///
/// For each transient state in partition order, runs `n_trajectories`
/// independent walks that step through the transition matrix until they hit
/// an absorbing state, and records where each walk ended. Transient states
/// are processed in order and each walk draws from `rng` sequentially, so a
/// given seed reproduces the result exactly.
///
/// # Errors
///
/// Returns [`AbsorptionError::TrajectoryTimeout`] if a walk takes
/// `max_steps` transitions without being absorbed, and
/// [`AbsorptionError::InvalidPartition`] if `partition` was built for a chain
/// of another size.
pub fn simulate_absorption(
    matrix: &TransitionMatrix,
    partition: &StatePartition,
    n_trajectories: usize,
    max_steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<SimulatedAbsorption, AbsorptionError> {
    partition.check_matches(matrix)?;
    let transient = partition.transient();
    let mut counts = Array2::<u64>::zeros((transient.len(), partition.absorbing().len()));

    for (row, &start) in transient.iter().enumerate() {
        for _ in 0..n_trajectories {
            let mut current = start;
            let mut steps = 0;
            let col = loop {
                if let Some(col) = partition.absorbing_column(current) {
                    break col;
                }
                if steps == max_steps {
                    return Err(AbsorptionError::TrajectoryTimeout {
                        start: start.label(),
                        max_steps,
                    });
                }
                current = matrix.sample(current, rng)?;
                steps += 1;
            };
            counts[[row, col]] += 1;
        }
    }

    let total = n_trajectories as f64;
    let probabilities = counts.mapv(|c| c as f64 / total);

    Ok(SimulatedAbsorption {
        counts,
        probabilities,
        n_trajectories,
    })
}
