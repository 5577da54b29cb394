//! Categorical sampling and probability-vector checks.

use ndarray::ArrayView1;

use crate::error::ChainError;

/// Tolerance on `|sum - 1|` for anything treated as a probability vector.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Draws an index from a categorical distribution using its cumulative CDF.
///
/// Draws one uniform number and walks the cumulative sum, returning the first
/// index whose cumulative probability meets or exceeds the draw. If rounding
/// leaves the draw unmatched, the last index with positive probability is
/// returned so an impossible state is never produced.
pub fn sample_categorical(probs: ArrayView1<'_, f64>, rng: &mut impl rand::Rng) -> usize {
    let u: f64 = rng.random();
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &p) in probs.iter().enumerate() {
        if p > 0.0 {
            cumulative += p;
            last_positive = i;
            if cumulative >= u {
                return i;
            }
        }
    }
    last_positive
}

/// Validates that `probs` is a probability vector over `n_states` states.
///
/// Checks the length, that every entry is finite and non-negative, and that
/// the entries sum to 1 within [`PROBABILITY_SUM_TOLERANCE`].
pub fn validate_distribution(probs: &[f64], n_states: usize) -> Result<(), ChainError> {
    if probs.len() != n_states {
        return Err(ChainError::InvalidDistribution {
            reason: format!("expected {n_states} entries, got {}", probs.len()),
        });
    }
    let mut sum = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        if !p.is_finite() || p < 0.0 {
            return Err(ChainError::InvalidDistribution {
                reason: format!("entry {i} = {p} is not a finite non-negative value"),
            });
        }
        sum += p;
    }
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(ChainError::InvalidDistribution {
            reason: format!("entries sum to {sum}, expected 1"),
        });
    }
    Ok(())
}
