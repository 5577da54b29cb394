//! Closed-form absorption probabilities via the fundamental matrix.
//!
//! With transient block `Q` and transient-to-absorbing block `R`:
//!
//! ```text
//! N = (I - Q)^-1      expected visits to each transient state
//! B = N · R           absorption probabilities
//! t = N · 1           expected steps before absorption
//! ```

use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Axis};

use chainval_chain::TransitionMatrix;

use crate::error::AbsorptionError;
use crate::partition::StatePartition;

/// `min |U_ii| / max |U_ii|` of the LU factors below this is treated as
/// singular. The ratio is independent of the block size, unlike the
/// determinant.
const PIVOT_RATIO_TOLERANCE: f64 = 1e-12;

/// Exact absorption quantities for one partitioned chain.
#[derive(Debug, Clone)]
pub struct ExactAbsorption {
    fundamental: Array2<f64>,
    probabilities: Array2<f64>,
    expected_steps: Array1<f64>,
}

impl ExactAbsorption {
    /// Fundamental matrix `N` (transient x transient).
    pub fn fundamental(&self) -> &Array2<f64> {
        &self.fundamental
    }

    /// Absorption probabilities `B` (transient x absorbing).
    pub fn probabilities(&self) -> &Array2<f64> {
        &self.probabilities
    }

    /// Expected number of steps before absorption, per transient state.
    pub fn expected_steps(&self) -> &Array1<f64> {
        &self.expected_steps
    }
}

/// Computes the fundamental matrix `N = (I - Q)^-1`.
///
/// # Errors
///
/// Returns [`AbsorptionError::SingularMatrix`] if `I - Q` is singular or so
/// ill-conditioned that its inverse is not finite, and
/// [`AbsorptionError::InvalidPartition`] if `partition` was built for a chain
/// of another size.
pub fn fundamental_matrix(
    matrix: &TransitionMatrix,
    partition: &StatePartition,
) -> Result<Array2<f64>, AbsorptionError> {
    partition.check_matches(matrix)?;
    let probs = matrix.probs();
    let transient = partition.transient();
    let t = transient.len();

    let i_minus_q = DMatrix::from_fn(t, t, |r, c| {
        let identity = if r == c { 1.0 } else { 0.0 };
        identity - probs[[transient[r].as_index(), transient[c].as_index()]]
    });

    let lu = i_minus_q.lu();
    let pivots = lu.u().map_diagonal(f64::abs);
    let (min_pivot, max_pivot) = pivots
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    if max_pivot <= 0.0 || min_pivot / max_pivot < PIVOT_RATIO_TOLERANCE {
        return Err(AbsorptionError::SingularMatrix);
    }
    let inv = lu.try_inverse().ok_or(AbsorptionError::SingularMatrix)?;
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(AbsorptionError::SingularMatrix);
    }

    Ok(Array2::from_shape_fn((t, t), |(r, c)| inv[(r, c)]))
}

/// Computes absorption probabilities, the fundamental matrix and expected
/// steps to absorption.
///
/// Row `i` of the probability matrix is transient state
/// `partition.transient()[i]`; column `j` is absorbing state
/// `partition.absorbing()[j]`.
///
/// # Errors
///
/// Returns [`AbsorptionError::SingularMatrix`] if `I - Q` is singular.
pub fn absorption_probabilities(
    matrix: &TransitionMatrix,
    partition: &StatePartition,
) -> Result<ExactAbsorption, AbsorptionError> {
    let fundamental = fundamental_matrix(matrix, partition)?;

    let transient = partition.transient();
    let absorbing = partition.absorbing();
    let probs = matrix.probs();
    let r = Array2::from_shape_fn((transient.len(), absorbing.len()), |(i, j)| {
        probs[[transient[i].as_index(), absorbing[j].as_index()]]
    });

    let probabilities = fundamental.dot(&r);
    let expected_steps = fundamental.sum_axis(Axis(1));

    Ok(ExactAbsorption {
        fundamental,
        probabilities,
        expected_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn example() -> TransitionMatrix {
        TransitionMatrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.2, 0.2, 0.2, 0.4],
            [0.25, 0.25, 0.25, 0.25],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn fundamental_hand_derived() {
        // I - Q = [[0.8, -0.2], [-0.25, 0.75]], det = 0.55.
        let m = example();
        let p = StatePartition::new(&m, &[1, 4], &[2, 3]).unwrap();
        let n = fundamental_matrix(&m, &p).unwrap();
        assert_abs_diff_eq!(n[[0, 0]], 0.75 / 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(n[[0, 1]], 0.2 / 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(n[[1, 0]], 0.25 / 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(n[[1, 1]], 0.8 / 0.55, epsilon = 1e-12);
    }

    #[test]
    fn probabilities_hand_derived() {
        let m = example();
        let p = StatePartition::new(&m, &[1, 4], &[2, 3]).unwrap();
        let exact = absorption_probabilities(&m, &p).unwrap();
        let b = exact.probabilities();
        assert_eq!(b.dim(), (2, 2));
        assert_abs_diff_eq!(b[[0, 0]], 4.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[[0, 1]], 7.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[[1, 0]], 5.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[[1, 1]], 6.0 / 11.0, epsilon = 1e-9);
    }

    #[test]
    fn expected_steps_hand_derived() {
        let m = example();
        let p = StatePartition::new(&m, &[1, 4], &[2, 3]).unwrap();
        let exact = absorption_probabilities(&m, &p).unwrap();
        assert_abs_diff_eq!(exact.expected_steps()[0], 19.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(exact.expected_steps()[1], 21.0 / 11.0, epsilon = 1e-9);
    }

    #[test]
    fn column_order_follows_partition() {
        let m = example();
        let p = StatePartition::new(&m, &[4, 1], &[3, 2]).unwrap();
        let b = absorption_probabilities(&m, &p).unwrap().probabilities().clone();
        // Row 0 is state 3, column 0 is state 4.
        assert_abs_diff_eq!(b[[0, 0]], 6.0 / 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b[[1, 1]], 4.0 / 11.0, epsilon = 1e-9);
    }

    #[test]
    fn closed_transient_class_is_singular() {
        // States 2 and 3 swap forever and never reach state 1.
        let m = TransitionMatrix::from_rows(&[
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
        ])
        .unwrap();
        let p = StatePartition::new(&m, &[1], &[2, 3]).unwrap();
        assert!(matches!(
            absorption_probabilities(&m, &p),
            Err(AbsorptionError::SingularMatrix)
        ));
    }

    #[test]
    fn large_well_conditioned_block_is_not_singular() {
        // I - Q = 0.5 I with 40 transient states: det = 0.5^40 but the
        // pivots are all equal.
        let n = 41;
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let mut row = vec![0.0; n];
                if i == 0 {
                    row[0] = 1.0;
                } else {
                    row[0] = 0.5;
                    row[i] = 0.5;
                }
                row
            })
            .collect();
        let m = TransitionMatrix::from_rows(&rows).unwrap();
        let p = StatePartition::infer(&m).unwrap();
        let exact = absorption_probabilities(&m, &p).unwrap();
        for &b in exact.probabilities() {
            assert_abs_diff_eq!(b, 1.0, epsilon = 1e-12);
        }
        for &steps in exact.expected_steps() {
            assert_abs_diff_eq!(steps, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn partition_from_other_chain_rejected() {
        let p = StatePartition::new(&example(), &[1, 4], &[2, 3]).unwrap();
        let other = TransitionMatrix::from_rows(&[[1.0, 0.0], [0.5, 0.5]]).unwrap();
        assert!(matches!(
            fundamental_matrix(&other, &p),
            Err(AbsorptionError::InvalidPartition { .. })
        ));
    }
}
