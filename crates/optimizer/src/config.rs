//! Optimizer configuration.

use baseiq_core::{Error, Result, SaConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`PlacementOptimizer`](crate::PlacementOptimizer).
///
/// Weights need not sum to 1; the total score is a plain weighted sum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationConfig {
    /// Maximum annealing iterations.
    pub max_iterations: u64,

    /// Initial annealing temperature.
    pub temperature: f64,

    /// Geometric cooling factor applied after every iteration, in (0, 1].
    pub cooling_rate: f64,

    /// Annealing stops once the temperature drops below this value.
    pub min_temperature: f64,

    /// Seed for the run's random generator.
    pub random_seed: u64,

    /// Weight of the hub accessibility score.
    pub pathfinding_weight: f64,

    /// Weight of the related-item proximity score.
    pub efficiency_weight: f64,

    /// Weight of the bounding-volume compactness score.
    pub compactness_weight: f64,

    /// Per-voxel penalty for free space a placement cuts off from the
    /// largest free region (0 = disabled).
    pub isolation_weight: f64,

    /// Number of independent annealing chains.
    pub chains: usize,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            temperature: 100.0,
            cooling_rate: 0.95,
            min_temperature: 0.1,
            random_seed: 42,
            pathfinding_weight: 0.4,
            efficiency_weight: 0.3,
            compactness_weight: 0.3,
            isolation_weight: 0.0,
            chains: 1,
        }
    }
}

impl OptimizationConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum iterations.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the initial temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the minimum temperature.
    pub fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = temperature;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Sets the pathfinding, efficiency and compactness weights.
    pub fn with_weights(mut self, pathfinding: f64, efficiency: f64, compactness: f64) -> Self {
        self.pathfinding_weight = pathfinding;
        self.efficiency_weight = efficiency;
        self.compactness_weight = compactness;
        self
    }

    /// Sets the isolation penalty weight.
    pub fn with_isolation_weight(mut self, weight: f64) -> Self {
        self.isolation_weight = weight;
        self
    }

    /// Sets the number of annealing chains.
    pub fn with_chains(mut self, chains: usize) -> Self {
        self.chains = chains;
        self
    }

    /// Checks that the configuration describes a runnable schedule.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("pathfinding_weight", self.pathfinding_weight),
            ("efficiency_weight", self.efficiency_weight),
            ("compactness_weight", self.compactness_weight),
            ("isolation_weight", self.isolation_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if self.cooling_rate.is_nan() || self.cooling_rate <= 0.0 || self.cooling_rate > 1.0 {
            return Err(Error::ConfigError(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.temperature.is_nan() || self.temperature <= 0.0 {
            return Err(Error::ConfigError(format!(
                "temperature must be positive, got {}",
                self.temperature
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(Error::ConfigError(format!(
                "min_temperature must be non-negative, got {}",
                self.min_temperature
            )));
        }
        if self.chains == 0 {
            return Err(Error::ConfigError("chains must be at least 1".into()));
        }
        Ok(())
    }

    /// Annealing schedule for the core runner.
    pub fn sa_config(&self) -> SaConfig {
        SaConfig::new()
            .with_initial_temp(self.temperature)
            .with_min_temp(self.min_temperature)
            .with_cooling_rate(self.cooling_rate)
            .with_max_iterations(self.max_iterations)
    }
}
