//! Rule set model.
//!
//! Planner-configured rules that bound the search. A rule set is
//! immutable during a solve; changes between solves invalidate any
//! existing draft (see the lifecycle controller).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Worker;

/// Default weekly shift cap when no rule is configured.
pub const DEFAULT_MAX_SHIFTS_PER_WEEK: u32 = 7;

/// Planner-configured scheduling rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Global cap on shifts per worker per week.
    pub max_shifts_per_week: u32,
    /// Per-worker overrides of the global cap (worker id → cap).
    pub max_shifts_overrides: HashMap<String, u32>,
    /// Allowed spread in shift counts across workers before the
    /// fairness penalty applies (soft objective, never a hard bound).
    pub fairness_tolerance: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            max_shifts_per_week: DEFAULT_MAX_SHIFTS_PER_WEEK,
            max_shifts_overrides: HashMap::new(),
            fairness_tolerance: 1,
        }
    }
}

impl RuleSet {
    /// Creates a rule set with the default weekly cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global weekly shift cap.
    pub fn with_max_shifts_per_week(mut self, max_shifts: u32) -> Self {
        self.max_shifts_per_week = max_shifts;
        self
    }

    /// Sets a per-worker weekly shift cap.
    pub fn with_max_shifts_override(mut self, worker_id: impl Into<String>, max: u32) -> Self {
        self.max_shifts_overrides.insert(worker_id.into(), max);
        self
    }

    /// Sets the fairness tolerance.
    pub fn with_fairness_tolerance(mut self, tolerance: u32) -> Self {
        self.fairness_tolerance = tolerance;
        self
    }

    /// Resolves the effective weekly cap for a worker.
    ///
    /// Precedence: worker's own cap → rule-set override → global cap.
    pub fn effective_max_shifts(&self, worker: &Worker) -> u32 {
        worker
            .max_shifts
            .or_else(|| self.max_shifts_overrides.get(&worker.id).copied())
            .unwrap_or(self.max_shifts_per_week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap() {
        let rules = RuleSet::new();
        let w = Worker::new("W1");
        assert_eq!(rules.effective_max_shifts(&w), DEFAULT_MAX_SHIFTS_PER_WEEK);
    }

    #[test]
    fn test_rule_override_precedence() {
        let rules = RuleSet::new()
            .with_max_shifts_per_week(5)
            .with_max_shifts_override("W1", 3);

        assert_eq!(rules.effective_max_shifts(&Worker::new("W1")), 3);
        assert_eq!(rules.effective_max_shifts(&Worker::new("W2")), 5);
    }

    #[test]
    fn test_worker_cap_wins() {
        let rules = RuleSet::new()
            .with_max_shifts_per_week(5)
            .with_max_shifts_override("W1", 3);
        let w = Worker::new("W1").with_max_shifts(2);

        assert_eq!(rules.effective_max_shifts(&w), 2);
    }
}
