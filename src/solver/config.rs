//! Solver configuration.

use std::time::Duration;

use crate::scoring::ScoringWeights;

/// Configuration for the assignment search engine.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use crewplan::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_budget(Duration::from_secs(2))
///     .with_restarts(8)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget for one solve. The incumbent is returned when
    /// it expires.
    pub budget: Duration,

    /// Improvement iterations per restart (hard cap). 0 = no cap, so
    /// only the wall-clock budget bounds the search.
    pub max_iterations: usize,

    /// Number of search restarts. Restart 0 is the deterministic greedy
    /// construction; later restarts explore shuffled task orders.
    pub restarts: usize,

    /// Task slots per worker per day.
    pub capacity_per_day: u32,

    /// Multiplier on the fairness penalty (spread beyond the rule set's
    /// tolerance).
    pub fairness_weight: f64,

    /// Scoring term weights.
    pub weights: ScoringWeights,

    /// Random seed. Fixed by default so identical inputs reproduce
    /// identical schedules.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            budget: Duration::from_secs(5),
            max_iterations: 20_000,
            restarts: 4,
            capacity_per_day: 1,
            fairness_weight: 0.5,
            weights: ScoringWeights::default(),
            seed: 42,
        }
    }
}

impl SolverConfig {
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_capacity_per_day(mut self, slots: u32) -> Self {
        self.capacity_per_day = slots;
        self
    }

    pub fn with_fairness_weight(mut self, w: f64) -> Self {
        self.fairness_weight = w;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.budget.is_zero() {
            return Err("budget must be non-zero".into());
        }
        if self.restarts == 0 {
            return Err("at least one restart is required".into());
        }
        if self.capacity_per_day == 0 {
            return Err("capacity_per_day must be at least 1".into());
        }
        if !self.fairness_weight.is_finite() || self.fairness_weight < 0.0 {
            return Err(format!(
                "fairness_weight must be finite and non-negative, got {}",
                self.fairness_weight
            ));
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.capacity_per_day, 1);
        assert_eq!(config.restarts, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_budget() {
        let config = SolverConfig::default().with_budget(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_restarts() {
        let config = SolverConfig::default().with_restarts(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = SolverConfig::default().with_capacity_per_day(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_fairness_weight() {
        let config = SolverConfig::default().with_fairness_weight(-0.5);
        assert!(config.validate().is_err());
    }
}
