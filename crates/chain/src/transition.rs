//! Row-stochastic transition matrices.

use ndarray::{Array2, ArrayView1};

use crate::distribution::{PROBABILITY_SUM_TOLERANCE, sample_categorical};
use crate::error::ChainError;
use crate::state::StateId;

/// An N x N row-stochastic transition matrix.
///
/// Row `i` holds the probabilities of moving from state `i` to every state.
/// A `TransitionMatrix` can only be built through [`TransitionMatrix::new`]
/// (or [`TransitionMatrix::from_rows`]), so every instance has been
/// validated: square, non-empty, finite, non-negative, rows summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    probs: Array2<f64>,
}

impl TransitionMatrix {
    /// Builds a transition matrix, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EmptyMatrix`] for a 0 x 0 input and
    /// [`ChainError::InvalidMatrix`] if the input is not square, contains a
    /// negative or non-finite entry, or has a row whose sum differs from 1 by
    /// more than 1e-6.
    pub fn new(probs: Array2<f64>) -> Result<Self, ChainError> {
        validate_probs(&probs)?;
        Ok(Self { probs })
    }

    /// Builds a transition matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Same as [`TransitionMatrix::new`]; ragged rows are reported as
    /// [`ChainError::InvalidMatrix`].
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ChainError> {
        let n_rows = rows.len();
        if n_rows == 0 {
            return Err(ChainError::EmptyMatrix);
        }
        let n_cols = rows[0].as_ref().len();
        let mut flat = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(ChainError::InvalidMatrix {
                    reason: format!("row {i} has {} entries, expected {n_cols}", row.len()),
                });
            }
            flat.extend_from_slice(row);
        }
        let probs = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|e| {
            ChainError::InvalidMatrix {
                reason: e.to_string(),
            }
        })?;
        Self::new(probs)
    }

    /// Returns the number of states N.
    pub fn n_states(&self) -> usize {
        self.probs.nrows()
    }

    /// Returns every state of the chain in ascending label order.
    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.n_states()).map(StateId::from_index)
    }

    /// Returns the state with 1-indexed `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StateOutOfRange`] unless `label` is in
    /// `1..=n_states`.
    pub fn state(&self, label: usize) -> Result<StateId, ChainError> {
        StateId::new(label, self.n_states())
    }

    fn index_of(&self, state: StateId) -> Result<usize, ChainError> {
        let i = state.as_index();
        if i >= self.n_states() {
            return Err(ChainError::StateOutOfRange {
                state: state.label(),
                n_states: self.n_states(),
            });
        }
        Ok(i)
    }

    /// Returns the transition probabilities out of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StateOutOfRange`] if `from` was checked against
    /// a larger chain.
    pub fn row(&self, from: StateId) -> Result<ArrayView1<'_, f64>, ChainError> {
        Ok(self.probs.row(self.index_of(from)?))
    }

    /// Returns the probability of moving from one state to another.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StateOutOfRange`] if either state lies outside
    /// this chain.
    pub fn prob(&self, from: StateId, to: StateId) -> Result<f64, ChainError> {
        Ok(self.probs[[self.index_of(from)?, self.index_of(to)?]])
    }

    /// Returns the full N x N probability matrix.
    pub fn probs(&self) -> &Array2<f64> {
        &self.probs
    }

    /// Returns `true` if no probability leaves `state`.
    ///
    /// Every off-diagonal entry of the row must be exactly 0, so a row such
    /// as `[1 - 1e-7, 1e-7]` is not absorbing even though it passes the
    /// row-sum tolerance. States outside the chain are never absorbing.
    pub fn is_absorbing(&self, state: StateId) -> bool {
        let Ok(i) = self.index_of(state) else {
            return false;
        };
        self.probs
            .row(i)
            .iter()
            .enumerate()
            .all(|(j, &p)| j == i || p == 0.0)
    }

    /// Returns every absorbing state in ascending order.
    pub fn absorbing_states(&self) -> Vec<StateId> {
        self.states().filter(|&s| self.is_absorbing(s)).collect()
    }

    /// Samples the next state given the current state.
    ///
    /// One uniform draw per call, walked through the row's cumulative
    /// distribution.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::StateOutOfRange`] if `from` lies outside this
    /// chain.
    pub fn sample(
        &self,
        from: StateId,
        rng: &mut impl rand::Rng,
    ) -> Result<StateId, ChainError> {
        Ok(StateId::from_index(sample_categorical(self.row(from)?, rng)))
    }
}

fn validate_probs(probs: &Array2<f64>) -> Result<(), ChainError> {
    let (n_rows, n_cols) = probs.dim();
    if n_rows == 0 && n_cols == 0 {
        return Err(ChainError::EmptyMatrix);
    }
    if n_rows != n_cols {
        return Err(ChainError::InvalidMatrix {
            reason: format!("matrix is {n_rows}x{n_cols}, expected square"),
        });
    }
    for (i, row) in probs.rows().into_iter().enumerate() {
        let mut sum = 0.0;
        for (j, &p) in row.iter().enumerate() {
            if !p.is_finite() {
                return Err(ChainError::InvalidMatrix {
                    reason: format!("probs[{i}][{j}] is not finite: {p}"),
                });
            }
            if p < 0.0 {
                return Err(ChainError::InvalidMatrix {
                    reason: format!("probs[{i}][{j}] = {p} is negative"),
                });
            }
            sum += p;
        }
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(ChainError::InvalidMatrix {
                reason: format!("row {i} sums to {sum}, expected 1"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn s(label: usize) -> StateId {
        StateId::from_index(label - 1)
    }

    #[test]
    fn row_access() {
        let tm = TransitionMatrix::new(array![[0.5, 0.3, 0.2], [0.1, 0.7, 0.2], [0.2, 0.3, 0.5]])
            .unwrap();
        assert_eq!(tm.n_states(), 3);
        assert_eq!(tm.row(s(1)).unwrap().to_vec(), vec![0.5, 0.3, 0.2]);
        assert_eq!(tm.row(s(3)).unwrap().to_vec(), vec![0.2, 0.3, 0.5]);
    }

    #[test]
    fn prob_access() {
        let tm = TransitionMatrix::new(array![[0.5, 0.3, 0.2], [0.1, 0.7, 0.2], [0.2, 0.3, 0.5]])
            .unwrap();
        assert!((tm.prob(s(1), s(2)).unwrap() - 0.3).abs() < 1e-12);
        assert!((tm.prob(s(2), s(3)).unwrap() - 0.2).abs() < 1e-12);
        assert!((tm.prob(s(3), s(1)).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn from_rows_matches_new() {
        let a = TransitionMatrix::from_rows(&[[0.9, 0.1], [0.4, 0.6]]).unwrap();
        let b = TransitionMatrix::new(array![[0.9, 0.1], [0.4, 0.6]]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_rows_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 0.0], vec![1.0]];
        assert!(matches!(
            TransitionMatrix::from_rows(&rows),
            Err(ChainError::InvalidMatrix { .. })
        ));
    }

    #[test]
    fn from_rows_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            TransitionMatrix::from_rows(&rows),
            Err(ChainError::EmptyMatrix)
        ));
    }

    #[test]
    fn validate_not_square() {
        let result = TransitionMatrix::new(array![[0.5, 0.5, 0.0], [0.0, 0.5, 0.5]]);
        assert!(matches!(result, Err(ChainError::InvalidMatrix { .. })));
    }

    #[test]
    fn validate_bad_sum() {
        let result = TransitionMatrix::new(array![
            [0.5, 0.3, 0.3], // sums to 1.1
            [0.1, 0.7, 0.2],
            [0.2, 0.3, 0.5]
        ]);
        assert!(matches!(result, Err(ChainError::InvalidMatrix { .. })));
    }

    #[test]
    fn validate_negative_entry() {
        let result = TransitionMatrix::new(array![[1.2, -0.2], [0.5, 0.5]]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("negative"), "{err}");
    }

    #[test]
    fn validate_nan_entry() {
        let result = TransitionMatrix::new(array![[f64::NAN, 1.0], [0.5, 0.5]]);
        assert!(matches!(result, Err(ChainError::InvalidMatrix { .. })));
    }

    #[test]
    fn validate_accepts_rounding() {
        // 0.2 + 0.2 + 0.2 + 0.4 is not exactly 1.0 in binary floating point.
        assert!(TransitionMatrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.2, 0.2, 0.2, 0.4],
            [0.25, 0.25, 0.25, 0.25],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .is_ok());
    }

    #[test]
    fn absorbing_states_detected() {
        let tm = TransitionMatrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.2, 0.2, 0.2, 0.4],
            [0.25, 0.25, 0.25, 0.25],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert!(tm.is_absorbing(s(1)));
        assert!(!tm.is_absorbing(s(2)));
        assert_eq!(tm.absorbing_states(), vec![s(1), s(4)]);
    }

    #[test]
    fn sample_distribution() {
        let tm = TransitionMatrix::new(array![[0.5, 0.3, 0.2], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            counts[tm.sample(s(1), &mut rng).unwrap().as_index()] += 1;
        }

        let f0 = counts[0] as f64 / n as f64;
        let f1 = counts[1] as f64 / n as f64;
        let f2 = counts[2] as f64 / n as f64;

        assert!((f0 - 0.5).abs() < 0.03, "state 1 frequency: {f0}, expected ~0.5");
        assert!((f1 - 0.3).abs() < 0.03, "state 2 frequency: {f1}, expected ~0.3");
        assert!((f2 - 0.2).abs() < 0.03, "state 3 frequency: {f2}, expected ~0.2");
    }

    #[test]
    fn sample_identity_is_deterministic() {
        let tm = TransitionMatrix::new(Array2::eye(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(tm.sample(s(2), &mut rng).unwrap(), s(2));
        }
    }

    #[test]
    fn leaking_self_loop_is_not_absorbing() {
        let tm = TransitionMatrix::from_rows(&[[1.0 - 1e-7, 1e-7], [0.0, 1.0]]).unwrap();
        assert!(!tm.is_absorbing(s(1)));
        assert!(tm.is_absorbing(s(2)));
        assert_eq!(tm.absorbing_states(), vec![s(2)]);
    }

    #[test]
    fn foreign_state_is_an_error() {
        let small = TransitionMatrix::from_rows(&[[0.5, 0.5], [0.5, 0.5]]).unwrap();
        let big = TransitionMatrix::new(Array2::eye(5)).unwrap();
        let foreign = big.state(5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            small.row(foreign),
            Err(ChainError::StateOutOfRange {
                state: 5,
                n_states: 2
            })
        ));
        assert!(small.prob(s(1), foreign).is_err());
        assert!(small.sample(foreign, &mut rng).is_err());
        assert!(!small.is_absorbing(foreign));
    }

    #[test]
    fn states_and_labels() {
        let tm = TransitionMatrix::new(Array2::eye(3)).unwrap();
        let labels: Vec<_> = tm.states().map(|s| s.label()).collect();
        assert_eq!(labels, [1, 2, 3]);
        assert_eq!(tm.state(2).unwrap(), s(2));
        assert!(tm.state(0).is_err());
        assert!(tm.state(4).is_err());
    }
}
