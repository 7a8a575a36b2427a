//! Configuration types for simulation runs
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};
use trumps_core::{Resolution, Result, SimError};

/// Simulation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent brackets to run
    pub trials: usize,
    /// Competitors per team (1 = everyone plays alone)
    pub team_size: usize,
    /// How team members' values are combined
    pub resolution: Resolution,
    /// Base seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Whether to run trials on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100_000,
            team_size: 1,
            resolution: Resolution::Max,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    /// Create config with the given number of trials
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            ..Default::default()
        }
    }

    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = team_size;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run trials on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check the configuration against a field of `competitor_count`.
    ///
    /// Returns the number of teams per bracket.
    pub fn validate(&self, competitor_count: usize) -> Result<usize> {
        if competitor_count == 0 {
            return Err(SimError::InvalidConfiguration(
                "at least one competitor is required".to_string(),
            ));
        }
        if self.trials == 0 {
            return Err(SimError::InvalidConfiguration(
                "number of trials must be positive".to_string(),
            ));
        }
        if self.team_size == 0 {
            return Err(SimError::InvalidConfiguration(
                "team size must be positive".to_string(),
            ));
        }
        if competitor_count % self.team_size != 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "team size {} does not divide {} competitors evenly",
                self.team_size, competitor_count
            )));
        }
        Ok(competitor_count / self.team_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.trials, 100_000);
        assert_eq!(config.team_size, 1);
        assert_eq!(config.resolution, Resolution::Max);
        assert_eq!(config.seed, None);
        assert!(config.parallel);
    }

    #[test]
    fn test_config_builders() {
        let config = SimulationConfig::new(50)
            .with_team_size(2)
            .with_resolution(Resolution::Sum)
            .with_seed(7)
            .sequential();
        assert_eq!(config.trials, 50);
        assert_eq!(config.team_size, 2);
        assert_eq!(config.resolution, Resolution::Sum);
        assert_eq!(config.seed, Some(7));
        assert!(!config.parallel);
    }

    #[test]
    fn test_validate_team_count() {
        assert_eq!(SimulationConfig::new(10).validate(5), Ok(5));
        assert_eq!(SimulationConfig::new(10).with_team_size(2).validate(4), Ok(2));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let invalid = |r: Result<usize>| matches!(r, Err(SimError::InvalidConfiguration(_)));

        assert!(invalid(SimulationConfig::new(10).validate(0)));
        assert!(invalid(SimulationConfig::new(0).validate(4)));
        assert!(invalid(SimulationConfig::new(10).with_team_size(0).validate(4)));
        assert!(invalid(SimulationConfig::new(10).with_team_size(3).validate(4)));
    }
}
