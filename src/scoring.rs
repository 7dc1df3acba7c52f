//! Candidate assignment scoring.
//!
//! Combines task priority, deadline urgency, and the learned preference
//! signal into a single comparable utility. Higher is better.
//!
//! The default weight ratio deliberately favors priority over the
//! learned preference so that accumulated overrides can steer ties and
//! near-ties without overriding manager-stated priorities.

use crate::models::{Task, Worker, HORIZON_DAYS};
use crate::preferences::PreferenceSnapshot;

/// Weights for the three scoring terms. Engine configuration, not
/// hardcoded policy.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Weight on the task's priority term.
    pub priority: f64,
    /// Weight on the deadline urgency term.
    pub urgency: f64,
    /// Weight on the learned preference term.
    pub preference: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            priority: 1.0,
            urgency: 0.5,
            preference: 0.25,
        }
    }
}

impl ScoringWeights {
    pub fn with_priority(mut self, w: f64) -> Self {
        self.priority = w;
        self
    }

    pub fn with_urgency(mut self, w: f64) -> Self {
        self.urgency = w;
        self
    }

    pub fn with_preference(mut self, w: f64) -> Self {
        self.preference = w;
        self
    }

    /// Validates the weights.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [
            ("priority", self.priority),
            ("urgency", self.urgency),
            ("preference", self.preference),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(format!("{name} weight must be finite and non-negative, got {w}"));
            }
        }
        Ok(())
    }
}

/// Deadline urgency at the start of the horizon.
///
/// Grows as the deadline approaches day zero; zero for tasks with no
/// deadline.
pub fn urgency(deadline: Option<u8>) -> f64 {
    match deadline {
        Some(day) => {
            let d = day.min(HORIZON_DAYS - 1) as f64;
            (HORIZON_DAYS as f64 - d) / HORIZON_DAYS as f64
        }
        None => 0.0,
    }
}

/// Scores candidate pairings against one preference snapshot.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    weights: ScoringWeights,
    preferences: &'a PreferenceSnapshot,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer over a snapshot.
    pub fn new(weights: ScoringWeights, preferences: &'a PreferenceSnapshot) -> Self {
        Self {
            weights,
            preferences,
        }
    }

    /// Utility of assigning `task` to `worker`. Higher is better.
    pub fn score(&self, task: &Task, worker: &Worker) -> f64 {
        self.weights.priority * task.priority.weight()
            + self.weights.urgency * urgency(task.deadline)
            + self.weights.preference
                * self
                    .preferences
                    .preference(&worker.id, &task.id, &task.required_skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::preferences::PreferenceStore;

    #[test]
    fn test_priority_monotone() {
        let snap = PreferenceStore::new().snapshot();
        let scorer = Scorer::new(ScoringWeights::default(), &snap);
        let worker = Worker::new("W1").with_skill("S");

        let low = scorer.score(&Task::new("T1", "S").with_priority(Priority::Low), &worker);
        let medium = scorer.score(&Task::new("T2", "S").with_priority(Priority::Medium), &worker);
        let high = scorer.score(&Task::new("T3", "S").with_priority(Priority::High), &worker);

        assert!(high > medium);
        assert!(medium > low);
    }

    #[test]
    fn test_urgency_increases_toward_day_zero() {
        assert!(urgency(Some(0)) > urgency(Some(3)));
        assert!(urgency(Some(3)) > urgency(Some(6)));
        assert_eq!(urgency(None), 0.0);
        assert!(urgency(Some(0)) <= 1.0);
    }

    #[test]
    fn test_earlier_deadline_scores_higher() {
        let snap = PreferenceStore::new().snapshot();
        let scorer = Scorer::new(ScoringWeights::default(), &snap);
        let worker = Worker::new("W1").with_skill("S");

        let tight = scorer.score(&Task::new("T1", "S").with_deadline(1), &worker);
        let loose = scorer.score(&Task::new("T2", "S").with_deadline(5), &worker);
        let none = scorer.score(&Task::new("T3", "S"), &worker);

        assert!(tight > loose);
        assert!(loose > none);
    }

    #[test]
    fn test_preference_shifts_score() {
        let mut store = PreferenceStore::new();
        store.adjust_skill("W2", "S", 2.0);
        let snap = store.snapshot();
        let scorer = Scorer::new(ScoringWeights::default(), &snap);

        let task = Task::new("T1", "S");
        let plain = scorer.score(&task, &Worker::new("W1").with_skill("S"));
        let favored = scorer.score(&task, &Worker::new("W2").with_skill("S"));

        assert!(favored > plain);
        assert!((favored - plain - 0.25 * 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_outranks_maximum_preference() {
        // A fully saturated preference must not flip High vs Low priority
        // under the default ratio.
        let mut store = PreferenceStore::new();
        store.adjust_skill("W1", "S", 100.0); // clamps to the bound
        let snap = store.snapshot();
        let scorer = Scorer::new(ScoringWeights::default(), &snap);
        let worker = Worker::new("W1").with_skill("S");

        let high_plain = scorer.score(&Task::new("T1", "X").with_priority(Priority::High), &worker);
        let low_favored = scorer.score(&Task::new("T2", "S").with_priority(Priority::Low), &worker);

        assert!(high_plain > low_favored);
    }

    #[test]
    fn test_weights_validate() {
        assert!(ScoringWeights::default().validate().is_ok());
        assert!(ScoringWeights::default().with_priority(-1.0).validate().is_err());
        assert!(ScoringWeights::default().with_urgency(f64::NAN).validate().is_err());
    }
}
