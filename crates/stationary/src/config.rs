//! Configuration for stationary-distribution analysis.

use chainval_chain::{ChainError, validate_distribution};

use crate::error::StationaryError;

/// How the start state of each simulated trajectory is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialDistribution {
    /// Every state equally likely.
    Uniform,
    /// State `i` (1-indexed) drawn with probability proportional to `i`.
    IndexWeighted,
    /// Caller-supplied probability vector, one entry per state.
    Custom(Vec<f64>),
}

impl InitialDistribution {
    /// Resolves this choice into a probability vector over `n_states` states.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidDistribution`] if a `Custom` vector has the
    /// wrong length or is not a probability vector.
    pub fn resolve(&self, n_states: usize) -> Result<Vec<f64>, ChainError> {
        match self {
            Self::Uniform => Ok(vec![1.0 / n_states as f64; n_states]),
            Self::IndexWeighted => {
                let total = (n_states * (n_states + 1) / 2) as f64;
                Ok((1..=n_states).map(|i| i as f64 / total).collect())
            }
            Self::Custom(probs) => {
                validate_distribution(probs, n_states)?;
                Ok(probs.clone())
            }
        }
    }
}

/// Configuration for the stationary analyzer.
///
/// # Example
///
/// ```
/// use chainval_stationary::{InitialDistribution, StationaryConfig};
///
/// let config = StationaryConfig::new()
///     .with_seed(100)
///     .with_initial_distribution(InitialDistribution::IndexWeighted);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StationaryConfig {
    seed: u64,
    n_trajectories: usize,
    trajectory_length: usize,
    power_exponent: u32,
    initial_distribution: InitialDistribution,
    eigen_tolerance: f64,
}

impl StationaryConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `seed = 100`, `n_trajectories = 100`,
    /// `trajectory_length = 1000`, `power_exponent = 64`,
    /// `initial_distribution = Uniform`, `eigen_tolerance = 1e-9`.
    pub fn new() -> Self {
        Self {
            seed: 100,
            n_trajectories: 100,
            trajectory_length: 1000,
            power_exponent: 64,
            initial_distribution: InitialDistribution::Uniform,
            eigen_tolerance: 1e-9,
        }
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of simulated trajectories.
    pub fn with_n_trajectories(mut self, n: usize) -> Self {
        self.n_trajectories = n;
        self
    }

    /// Sets the number of transitions per trajectory.
    pub fn with_trajectory_length(mut self, len: usize) -> Self {
        self.trajectory_length = len;
        self
    }

    /// Sets the exponent `k` of the `(Pᵀ)^k` power method.
    pub fn with_power_exponent(mut self, k: u32) -> Self {
        self.power_exponent = k;
        self
    }

    /// Sets the distribution of trajectory start states.
    pub fn with_initial_distribution(mut self, initial: InitialDistribution) -> Self {
        self.initial_distribution = initial;
        self
    }

    /// Sets the allowed distance between the selected eigenvalue and 1.
    pub fn with_eigen_tolerance(mut self, tolerance: f64) -> Self {
        self.eigen_tolerance = tolerance;
        self
    }

    // --- Accessors ---

    /// Returns the RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of simulated trajectories.
    pub fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    /// Returns the number of transitions per trajectory.
    pub fn trajectory_length(&self) -> usize {
        self.trajectory_length
    }

    /// Returns the power-method exponent.
    pub fn power_exponent(&self) -> u32 {
        self.power_exponent
    }

    /// Returns the start-state distribution.
    pub fn initial_distribution(&self) -> &InitialDistribution {
        &self.initial_distribution
    }

    /// Returns the eigenvalue tolerance.
    pub fn eigen_tolerance(&self) -> f64 {
        self.eigen_tolerance
    }

    /// Validates this configuration.
    ///
    /// Counts and the exponent must be positive and the tolerance finite and
    /// positive. A `Custom` initial distribution is checked against the
    /// matrix when the analysis runs, since its length depends on it.
    pub fn validate(&self) -> Result<(), StationaryError> {
        if self.n_trajectories == 0 {
            return Err(StationaryError::InvalidConfig {
                reason: "n_trajectories must be > 0".to_string(),
            });
        }
        if self.trajectory_length == 0 {
            return Err(StationaryError::InvalidConfig {
                reason: "trajectory_length must be > 0".to_string(),
            });
        }
        if self.power_exponent == 0 {
            return Err(StationaryError::InvalidConfig {
                reason: "power_exponent must be > 0".to_string(),
            });
        }
        if !self.eigen_tolerance.is_finite() || self.eigen_tolerance <= 0.0 {
            return Err(StationaryError::InvalidConfig {
                reason: format!(
                    "eigen_tolerance must be finite and positive, got {}",
                    self.eigen_tolerance
                ),
            });
        }
        Ok(())
    }
}

impl Default for StationaryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let cfg = StationaryConfig::new();
        assert_eq!(cfg.seed(), 100);
        assert_eq!(cfg.n_trajectories(), 100);
        assert_eq!(cfg.trajectory_length(), 1000);
        assert_eq!(cfg.power_exponent(), 64);
        assert_eq!(cfg.initial_distribution(), &InitialDistribution::Uniform);
        assert!((cfg.eigen_tolerance() - 1e-9).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_chaining() {
        let cfg = StationaryConfig::new()
            .with_seed(1)
            .with_n_trajectories(2)
            .with_trajectory_length(3)
            .with_power_exponent(4)
            .with_initial_distribution(InitialDistribution::IndexWeighted)
            .with_eigen_tolerance(1e-6);
        assert_eq!(cfg.seed(), 1);
        assert_eq!(cfg.n_trajectories(), 2);
        assert_eq!(cfg.trajectory_length(), 3);
        assert_eq!(cfg.power_exponent(), 4);
        assert_eq!(
            cfg.initial_distribution(),
            &InitialDistribution::IndexWeighted
        );
        assert!((cfg.eigen_tolerance() - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_ok() {
        assert!(StationaryConfig::new().validate().is_ok());
    }

    #[test]
    fn validate_bad_counts() {
        assert!(
            StationaryConfig::new()
                .with_n_trajectories(0)
                .validate()
                .is_err()
        );
        assert!(
            StationaryConfig::new()
                .with_trajectory_length(0)
                .validate()
                .is_err()
        );
        assert!(
            StationaryConfig::new()
                .with_power_exponent(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_bad_tolerance() {
        for tol in [0.0, -1e-9, f64::NAN, f64::INFINITY] {
            assert!(
                StationaryConfig::new()
                    .with_eigen_tolerance(tol)
                    .validate()
                    .is_err(),
                "tolerance {tol} should be rejected"
            );
        }
    }

    #[test]
    fn resolve_uniform() {
        let p = InitialDistribution::Uniform.resolve(4).unwrap();
        assert_eq!(p, vec![0.25; 4]);
    }

    #[test]
    fn resolve_index_weighted() {
        let p = InitialDistribution::IndexWeighted.resolve(4).unwrap();
        let expected = [0.1, 0.2, 0.3, 0.4];
        for (a, b) in p.iter().zip(expected) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn resolve_custom() {
        let p = InitialDistribution::Custom(vec![0.0, 1.0]).resolve(2).unwrap();
        assert_eq!(p, vec![0.0, 1.0]);
        assert!(
            InitialDistribution::Custom(vec![0.5, 0.5])
                .resolve(3)
                .is_err()
        );
    }
}
