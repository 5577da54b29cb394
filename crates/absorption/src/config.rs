//! Configuration for absorption analysis.

use crate::error::AbsorptionError;

/// Configuration for the absorption simulator.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use chainval_absorption::AbsorptionConfig;
///
/// let config = AbsorptionConfig::new()
///     .with_seed(7)
///     .with_n_trajectories(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsorptionConfig {
    seed: u64,
    n_trajectories: usize,
    max_steps: usize,
}

impl AbsorptionConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `seed = 77`, `n_trajectories = 10_000` per transient
    /// state, `max_steps = 1_000_000` per trajectory.
    pub fn new() -> Self {
        Self {
            seed: 77,
            n_trajectories: 10_000,
            max_steps: 1_000_000,
        }
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of trajectories simulated from each transient state.
    pub fn with_n_trajectories(mut self, n: usize) -> Self {
        self.n_trajectories = n;
        self
    }

    /// Sets the step cap after which a trajectory is reported as timed out.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    // --- Accessors ---

    /// Returns the RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of trajectories per transient state.
    pub fn n_trajectories(&self) -> usize {
        self.n_trajectories
    }

    /// Returns the per-trajectory step cap.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Validates this configuration.
    ///
    /// Both `n_trajectories` and `max_steps` must be positive.
    pub fn validate(&self) -> Result<(), AbsorptionError> {
        if self.n_trajectories == 0 {
            return Err(AbsorptionError::InvalidConfig {
                reason: "n_trajectories must be > 0".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(AbsorptionError::InvalidConfig {
                reason: "max_steps must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AbsorptionConfig {
    fn default() -> Self {
        Self::new()
    }
}
