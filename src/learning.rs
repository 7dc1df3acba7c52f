//! Preference learning from planner overrides.
//!
//! Every manual reassignment of a finalized-bound schedule is treated
//! as a weak signal about who should be doing what: the worker the
//! planner moved a task TO gains affinity for the task's skill, and the
//! worker it was moved FROM loses a little. A pairing that planners
//! keep re-creating graduates to a task-specific weight, which the
//! scorer prefers over the skill-level one.
//!
//! Updates are small, bounded, and decayed once per finalized horizon,
//! so a handful of consistent overrides shifts future drafts while a
//! one-off correction fades out. The loop only nudges the soft scoring
//! term; it can never relax a hard constraint.

use std::collections::HashMap;

use tracing::debug;

use crate::preferences::PreferenceStore;

/// Default weight shift applied per override.
pub const DEFAULT_LEARNING_STEP: f64 = 1.0;

/// Overrides of the same (worker, task) pairing needed before a
/// task-specific weight is written.
pub const DEFAULT_REPEAT_THRESHOLD: u32 = 2;

/// Factor applied to all weights at the end of each finalized horizon.
pub const DEFAULT_DECAY: f64 = 0.9;

/// One planner override, as recorded by the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRecord {
    /// The task that was reassigned.
    pub task_id: String,
    /// The worker displaced by the override, if the task was assigned.
    pub from_worker: Option<String>,
    /// The worker the planner chose.
    pub to_worker: String,
    /// Schedule version the override was applied against.
    pub schedule_version: u64,
    /// Position in the horizon's override log.
    pub seq: u64,
}

/// Applies override records to the preference store.
#[derive(Debug, Clone)]
pub struct LearningLoop {
    step: f64,
    repeat_threshold: u32,
    decay: f64,
    /// (worker id, task id) → times the planner chose this pairing.
    repeat_counts: HashMap<(String, String), u32>,
}

impl Default for LearningLoop {
    fn default() -> Self {
        Self {
            step: DEFAULT_LEARNING_STEP,
            repeat_threshold: DEFAULT_REPEAT_THRESHOLD,
            decay: DEFAULT_DECAY,
            repeat_counts: HashMap::new(),
        }
    }
}

impl LearningLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_repeat_threshold(mut self, threshold: u32) -> Self {
        self.repeat_threshold = threshold;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Applies one override to the store.
    ///
    /// `skill` is the reassigned task's required skill. The chosen
    /// worker's skill weight rises by one step; the displaced worker's
    /// falls by half a step. Once the same (worker, task) pairing has
    /// been chosen `repeat_threshold` times, a task-specific weight is
    /// reinforced as well.
    pub fn apply(&mut self, store: &mut PreferenceStore, record: &OverrideRecord, skill: &str) {
        store.adjust_skill(&record.to_worker, skill, self.step);
        if let Some(from) = &record.from_worker {
            store.adjust_skill(from, skill, -self.step / 2.0);
        }

        let count = self
            .repeat_counts
            .entry((record.to_worker.clone(), record.task_id.clone()))
            .or_insert(0);
        *count += 1;
        if *count >= self.repeat_threshold {
            store.adjust_task(&record.to_worker, &record.task_id, self.step);
        }

        debug!(
            task = %record.task_id,
            to = %record.to_worker,
            from = record.from_worker.as_deref().unwrap_or("-"),
            repeats = *count,
            "override learned"
        );
    }

    /// Applies a batch of overrides in log order.
    pub fn apply_all<'a, I>(&mut self, store: &mut PreferenceStore, records: I, skill_of: impl Fn(&str) -> Option<&'a str>)
    where
        I: IntoIterator<Item = &'a OverrideRecord>,
    {
        for record in records {
            if let Some(skill) = skill_of(&record.task_id) {
                self.apply(store, record, skill);
            }
        }
    }

    /// End-of-horizon decay. Called once per finalize.
    ///
    /// Repeat counts halve along with the weights, so a task-specific
    /// weight only graduates from overrides in nearby horizons, not
    /// from two isolated picks a season apart.
    pub fn end_of_horizon(&mut self, store: &mut PreferenceStore) {
        store.decay(self.decay);
        self.repeat_counts.retain(|_, count| {
            *count /= 2;
            *count > 0
        });
    }
}
