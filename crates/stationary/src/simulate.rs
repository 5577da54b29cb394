//! Occupancy-frequency estimate of the stationary distribution.

use ndarray::{Array1, ArrayView1};

use chainval_chain::{
    StateId, TransitionMatrix, sample_categorical, simulate_path_into, validate_distribution,
};

use crate::error::StationaryError;

/// Tallied state visits across every simulated trajectory.
#[derive(Debug, Clone)]
pub struct SimulatedOccupancy {
    counts: Vec<u64>,
    frequencies: Array1<f64>,
    start_states: Vec<StateId>,
    n_observations: u64,
}

impl SimulatedOccupancy {
    /// Visits per state across all trajectories and time steps.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Visit frequencies, `counts / n_observations`.
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }

    /// Start state drawn for each trajectory, in simulation order.
    pub fn start_states(&self) -> &[StateId] {
        &self.start_states
    }

    /// Total observations, `n_trajectories * trajectory_length`.
    pub fn n_observations(&self) -> u64 {
        self.n_observations
    }
}

/// Estimates the stationary distribution from simulated visit frequencies.
///
/// Each trajectory draws a start state from `initial`, then takes
/// `trajectory_length` transitions; the state after every transition is
/// counted. The start state itself is not counted, and early (burn-in)
/// steps are counted alongside later ones.
///
/// # Errors
///
/// Returns [`StationaryError::Chain`] if `initial` is not a probability
/// vector over the matrix's states.
pub fn simulate_occupancy(
    matrix: &TransitionMatrix,
    initial: &[f64],
    n_trajectories: usize,
    trajectory_length: usize,
    rng: &mut impl rand::Rng,
) -> Result<SimulatedOccupancy, StationaryError> {
    let n = matrix.n_states();
    validate_distribution(initial, n)?;
    let initial = ArrayView1::from(initial);

    let mut counts = vec![0_u64; n];
    let mut start_states = Vec::with_capacity(n_trajectories);
    let mut path = vec![matrix.state(1)?; trajectory_length];

    for _ in 0..n_trajectories {
        let start = matrix.state(sample_categorical(initial, rng) + 1)?;
        start_states.push(start);
        simulate_path_into(matrix, start, trajectory_length, rng, &mut path)?;
        for s in &path {
            counts[s.as_index()] += 1;
        }
    }

    let n_observations = (n_trajectories * trajectory_length) as u64;
    let frequencies = counts
        .iter()
        .map(|&c| c as f64 / n_observations as f64)
        .collect();

    Ok(SimulatedOccupancy {
        counts,
        frequencies,
        start_states,
        n_observations,
    })
}
