//! Stationary distribution by raising `Pᵀ` to a fixed power.

use ndarray::{Array1, Array2};

use chainval_chain::TransitionMatrix;

/// Raises a square matrix to a positive integer power by repeated squaring.
///
/// `exponent = 0` yields the identity.
pub fn matrix_power(a: &Array2<f64>, exponent: u32) -> Array2<f64> {
    let mut result = Array2::eye(a.nrows());
    let mut base = a.to_owned();
    let mut k = exponent;
    while k > 0 {
        if k & 1 == 1 {
            result = result.dot(&base);
        }
        k >>= 1;
        if k > 0 {
            base = base.dot(&base);
        }
    }
    result
}

/// Approximates the stationary distribution as column 0 of `(Pᵀ)^k`.
///
/// For an ergodic chain every column of `(Pᵀ)^k` converges to the stationary
/// distribution, with error shrinking geometrically in `k` at a rate set by
/// the second-largest eigenvalue modulus. The column is returned as is, so it
/// sums to 1 up to rounding.
pub fn power_stationary(matrix: &TransitionMatrix, exponent: u32) -> Array1<f64> {
    let transposed = matrix.probs().t().to_owned();
    matrix_power(&transposed, exponent).column(0).to_owned()
}
