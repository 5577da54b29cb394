//! Stationary distribution from the eigendecomposition of `Pᵀ`.
//!
//! The stationary distribution is the eigenvector of `Pᵀ` for eigenvalue 1,
//! scaled to sum to 1. Eigenvalues come from a real Schur decomposition; the
//! eigenvector is the null space of `Pᵀ - λI`, read off as the right singular
//! vector of its smallest singular value.

use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};
use ndarray::Array1;
use tracing::warn;

use chainval_chain::TransitionMatrix;

use crate::error::StationaryError;

/// Convergence threshold passed to the Schur iteration.
const SCHUR_EPSILON: f64 = f64::EPSILON;

/// Iteration cap for the Schur decomposition.
const SCHUR_MAX_ITERATIONS: usize = 10_000;

/// An eigenvector sum smaller than this cannot be normalized.
const DEGENERATE_SUM: f64 = 1e-12;

/// Raised when the eigenvalue nearest 1 is further from 1 than the
/// configured tolerance.
///
/// Non-fatal: the normalized eigenvector is still returned and the caller
/// decides whether to trust it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenvalueWarning {
    eigenvalue: Complex<f64>,
    deviation: f64,
    tolerance: f64,
}

impl EigenvalueWarning {
    /// The selected eigenvalue.
    pub fn eigenvalue(&self) -> Complex<f64> {
        self.eigenvalue
    }

    /// `|λ - 1|`.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// The tolerance that was exceeded.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl std::fmt::Display for EigenvalueWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "eigenvalue nearest 1 is {}{:+}i, |λ - 1| = {:e} exceeds tolerance {:e}",
            self.eigenvalue.re, self.eigenvalue.im, self.deviation, self.tolerance
        )
    }
}

/// Output of the eigen method.
#[derive(Debug, Clone)]
pub struct EigenStationary {
    distribution: Array1<f64>,
    eigenvalues: Vec<Complex<f64>>,
    selected: Complex<f64>,
    warning: Option<EigenvalueWarning>,
}

impl EigenStationary {
    /// The normalized eigenvector.
    pub fn distribution(&self) -> &Array1<f64> {
        &self.distribution
    }

    /// Every eigenvalue of `Pᵀ`, in the order the Schur form yields them.
    pub fn eigenvalues(&self) -> &[Complex<f64>] {
        &self.eigenvalues
    }

    /// The eigenvalue whose eigenvector was used.
    pub fn selected_eigenvalue(&self) -> Complex<f64> {
        self.selected
    }

    /// Present when the selected eigenvalue is not within tolerance of 1.
    pub fn warning(&self) -> Option<&EigenvalueWarning> {
        self.warning.as_ref()
    }
}

/// Computes the stationary distribution by eigendecomposition of `Pᵀ`.
///
/// Selects the eigenvalue with the smallest distance to 1, extracts its
/// eigenvector and divides it by its sum, which fixes both sign and scale.
/// If that eigenvalue is more than `tolerance` away from 1 an
/// [`EigenvalueWarning`] is logged and attached to the result.
///
/// # Errors
///
/// Returns [`StationaryError::EigenDecompositionFailed`] if the Schur
/// iteration or SVD does not converge, and
/// [`StationaryError::DegenerateEigenvector`] if the eigenvector sums to 0.
pub fn eigen_stationary(
    matrix: &TransitionMatrix,
    tolerance: f64,
) -> Result<EigenStationary, StationaryError> {
    let n = matrix.n_states();
    let probs = matrix.probs();
    let transposed = DMatrix::from_fn(n, n, |r, c| probs[[c, r]]);

    let schur = Schur::try_new(transposed.clone(), SCHUR_EPSILON, SCHUR_MAX_ITERATIONS)
        .ok_or(StationaryError::EigenDecompositionFailed)?;
    let eigenvalues: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();

    let one = Complex::new(1.0, 0.0);
    let selected = eigenvalues
        .iter()
        .copied()
        .min_by(|a, b| (*a - one).norm().total_cmp(&(*b - one).norm()))
        .ok_or(StationaryError::EigenDecompositionFailed)?;

    let deviation = (selected - one).norm();
    let warning = (deviation > tolerance).then(|| {
        let w = EigenvalueWarning {
            eigenvalue: selected,
            deviation,
            tolerance,
        };
        warn!(%w, "selected eigenvalue is not within tolerance of 1");
        w
    });

    let shifted = transposed - DMatrix::<f64>::identity(n, n) * selected.re;
    let svd = shifted.svd(false, true);
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or(StationaryError::EigenDecompositionFailed)?;
    let null_idx = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .ok_or(StationaryError::EigenDecompositionFailed)?;

    let vector: Array1<f64> = v_t.row(null_idx).iter().copied().collect();
    let sum = vector.sum();
    if !sum.is_finite() || sum.abs() < DEGENERATE_SUM {
        return Err(StationaryError::DegenerateEigenvector {
            eigenvalue: selected.re,
        });
    }

    Ok(EigenStationary {
        distribution: vector / sum,
        eigenvalues,
        selected,
        warning,
    })
}
