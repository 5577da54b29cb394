//! Markov chain path simulation.

use crate::error::ChainError;
use crate::state::StateId;
use crate::transition::TransitionMatrix;

/// Simulates a sequence of states.
///
/// # Arguments
///
/// * `matrix` - Transition matrix.
/// * `initial` - The state before the first simulated step.
/// * `n_steps` - Number of transitions to simulate.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// A vector of `n_steps` states; element `t` is the state after transition
/// `t + 1`. The initial state itself is not included.
///
/// # Errors
///
/// Returns [`ChainError::StateOutOfRange`] if `initial` lies outside the
/// chain.
pub fn simulate_path(
    matrix: &TransitionMatrix,
    initial: StateId,
    n_steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<StateId>, ChainError> {
    let mut out = vec![initial; n_steps];
    simulate_path_into(matrix, initial, n_steps, rng, &mut out)?;
    Ok(out)
}

/// Simulates states into a pre-allocated buffer.
///
/// Fills `out` with `n_steps` consecutive states, consuming the same draws as
/// [`simulate_path`] with the same arguments.
///
/// # Errors
///
/// Returns [`ChainError::BufferLengthMismatch`] if `out.len() != n_steps`,
/// and [`ChainError::StateOutOfRange`] if `initial` lies outside the chain.
pub fn simulate_path_into(
    matrix: &TransitionMatrix,
    initial: StateId,
    n_steps: usize,
    rng: &mut impl rand::Rng,
    out: &mut [StateId],
) -> Result<(), ChainError> {
    if out.len() != n_steps {
        return Err(ChainError::BufferLengthMismatch {
            expected: n_steps,
            got: out.len(),
        });
    }
    let mut prev = matrix.state(initial.label())?;
    for slot in out.iter_mut() {
        prev = matrix.sample(prev, rng)?;
        *slot = prev;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mixing() -> TransitionMatrix {
        TransitionMatrix::from_rows(&[[0.5, 0.3, 0.2], [0.1, 0.7, 0.2], [0.2, 0.3, 0.5]]).unwrap()
    }

    fn identity() -> TransitionMatrix {
        TransitionMatrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]).unwrap()
    }

    #[test]
    fn length_correctness() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = simulate_path(&mixing(), StateId::from_index(0), 100, &mut rng).unwrap();
        assert_eq!(result.len(), 100);
    }

    #[test]
    fn zero_steps() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = simulate_path(&identity(), StateId::from_index(0), 0, &mut rng).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn deterministic_with_seed() {
        let tm = mixing();

        let mut rng1 = StdRng::seed_from_u64(123);
        let result1 = simulate_path(&tm, StateId::from_index(1), 50, &mut rng1).unwrap();

        let mut rng2 = StdRng::seed_from_u64(123);
        let result2 = simulate_path(&tm, StateId::from_index(1), 50, &mut rng2).unwrap();

        assert_eq!(result1, result2);
    }

    #[test]
    fn identity_preserves_state() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = StateId::from_index(2);
        let result = simulate_path(&identity(), start, 50, &mut rng).unwrap();
        assert!(
            result.iter().all(|&s| s == start),
            "identity matrix should never leave the start state"
        );
    }

    #[test]
    fn into_matches_allocating() {
        let tm = mixing();
        let start = StateId::from_index(2);

        let mut rng1 = StdRng::seed_from_u64(999);
        let alloc_result = simulate_path(&tm, start, 30, &mut rng1).unwrap();

        let mut rng2 = StdRng::seed_from_u64(999);
        let mut buf = vec![start; 30];
        simulate_path_into(&tm, start, 30, &mut rng2, &mut buf).unwrap();

        assert_eq!(alloc_result, buf);
    }

    #[test]
    fn buffer_mismatch_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut buf = vec![StateId::from_index(0); 5];

        let result = simulate_path_into(&identity(), StateId::from_index(0), 10, &mut rng, &mut buf);
        assert!(matches!(
            result,
            Err(ChainError::BufferLengthMismatch {
                expected: 10,
                got: 5
            })
        ));
    }

    #[test]
    fn distribution_test() {
        // Doubly stochastic, so the long-run frequencies are uniform.
        let tm =
            TransitionMatrix::from_rows(&[[0.2, 0.5, 0.3], [0.3, 0.2, 0.5], [0.5, 0.3, 0.2]])
                .unwrap();
        let n = 10_000;
        let mut rng = StdRng::seed_from_u64(42);

        let result = simulate_path(&tm, StateId::from_index(0), n, &mut rng).unwrap();

        let mut counts = [0usize; 3];
        for s in &result {
            counts[s.as_index()] += 1;
        }

        for (i, &c) in counts.iter().enumerate() {
            let f = c as f64 / n as f64;
            assert!(
                (f - 1.0 / 3.0).abs() < 0.05,
                "state {} frequency: {f}, expected ~0.33",
                i + 1
            );
        }
    }

    #[test]
    fn foreign_initial_state_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let big = TransitionMatrix::from_rows(&[[0.25; 4]; 4]).unwrap();
        let foreign = big.state(4).unwrap();
        assert!(matches!(
            simulate_path(&identity(), foreign, 3, &mut rng),
            Err(ChainError::StateOutOfRange {
                state: 4,
                n_states: 3
            })
        ));
    }

    #[test]
    fn zero_steps_still_checks_initial() {
        let mut rng = StdRng::seed_from_u64(42);
        let big = TransitionMatrix::from_rows(&[[0.25; 4]; 4]).unwrap();
        let foreign = big.state(4).unwrap();
        assert!(simulate_path(&identity(), foreign, 0, &mut rng).is_err());
    }
}
