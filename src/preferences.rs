//! Learned preference weights.
//!
//! The preference store is the single owner of the learned affinity
//! signal between workers and skills (and, for repeatedly reinforced
//! pairs, specific tasks). Only the learning loop writes to it; the
//! scorer reads an immutable snapshot taken at solve start, so weight
//! updates mid-solve never produce inconsistent scoring within one
//! solve.
//!
//! Weights are bounded to ±[`WEIGHT_BOUND`] and decay toward zero once
//! per finalized horizon, so old manual preferences fade unless
//! reinforced.

use std::collections::HashMap;

/// Magnitude bound on any learned weight.
pub const WEIGHT_BOUND: f64 = 5.0;

/// Weights below this magnitude are dropped during decay.
const PRUNE_EPSILON: f64 = 1e-3;

/// Mutable owner of the learned weights. Single-writer.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    /// (worker id, skill) → weight.
    skill_weights: HashMap<(String, String), f64>,
    /// (worker id, task id) → weight. Overrides the skill weight.
    task_weights: HashMap<(String, String), f64>,
    /// Bumped on every mutation; stamps snapshots.
    version: u64,
}

impl PreferenceStore {
    /// Creates an empty store: every weight reads as zero (neutral).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mutation version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reads a (worker, skill) weight. Zero when unset.
    pub fn skill_weight(&self, worker_id: &str, skill: &str) -> f64 {
        self.skill_weights
            .get(&(worker_id.to_string(), skill.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Reads a (worker, task) weight. Zero when unset.
    pub fn task_weight(&self, worker_id: &str, task_id: &str) -> f64 {
        self.task_weights
            .get(&(worker_id.to_string(), task_id.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Shifts a (worker, skill) weight by `delta`, clamped to the bound.
    pub fn adjust_skill(&mut self, worker_id: &str, skill: &str, delta: f64) {
        let entry = self
            .skill_weights
            .entry((worker_id.to_string(), skill.to_string()))
            .or_insert(0.0);
        *entry = (*entry + delta).clamp(-WEIGHT_BOUND, WEIGHT_BOUND);
        self.version += 1;
    }

    /// Shifts a (worker, task) weight by `delta`, clamped to the bound.
    pub fn adjust_task(&mut self, worker_id: &str, task_id: &str, delta: f64) {
        let entry = self
            .task_weights
            .entry((worker_id.to_string(), task_id.to_string()))
            .or_insert(0.0);
        *entry = (*entry + delta).clamp(-WEIGHT_BOUND, WEIGHT_BOUND);
        self.version += 1;
    }

    /// Multiplies every weight by `factor` (0 < factor < 1), pruning
    /// entries that have decayed to noise.
    pub fn decay(&mut self, factor: f64) {
        for map in [&mut self.skill_weights, &mut self.task_weights] {
            map.retain(|_, w| {
                *w *= factor;
                w.abs() >= PRUNE_EPSILON
            });
        }
        self.version += 1;
    }

    /// Takes an immutable snapshot for one solve.
    pub fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            skill_weights: self.skill_weights.clone(),
            task_weights: self.task_weights.clone(),
            version: self.version,
        }
    }
}

/// Read-only view of the weights, consistent for the duration of a solve.
#[derive(Debug, Clone, Default)]
pub struct PreferenceSnapshot {
    skill_weights: HashMap<(String, String), f64>,
    task_weights: HashMap<(String, String), f64>,
    version: u64,
}

impl PreferenceSnapshot {
    /// The store version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The learned affinity of a worker for a task.
    ///
    /// The task-specific weight takes precedence when present;
    /// otherwise the (worker, skill) weight applies; otherwise zero.
    pub fn preference(&self, worker_id: &str, task_id: &str, skill: &str) -> f64 {
        if let Some(&w) = self
            .task_weights
            .get(&(worker_id.to_string(), task_id.to_string()))
        {
            return w;
        }
        self.skill_weights
            .get(&(worker_id.to_string(), skill.to_string()))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_by_default() {
        let store = PreferenceStore::new();
        assert_eq!(store.skill_weight("W1", "Electrical"), 0.0);
        assert_eq!(store.task_weight("W1", "T1"), 0.0);
        assert_eq!(store.snapshot().preference("W1", "T1", "Electrical"), 0.0);
    }

    #[test]
    fn test_adjust_and_read() {
        let mut store = PreferenceStore::new();
        store.adjust_skill("W1", "Electrical", 1.0);
        store.adjust_skill("W1", "Electrical", 0.5);
        assert!((store.skill_weight("W1", "Electrical") - 1.5).abs() < 1e-10);
        assert_eq!(store.skill_weight("W2", "Electrical"), 0.0);
    }

    #[test]
    fn test_clamped_to_bound() {
        let mut store = PreferenceStore::new();
        for _ in 0..20 {
            store.adjust_skill("W1", "Electrical", 1.0);
            store.adjust_task("W1", "T1", -1.0);
        }
        assert!((store.skill_weight("W1", "Electrical") - WEIGHT_BOUND).abs() < 1e-10);
        assert!((store.task_weight("W1", "T1") + WEIGHT_BOUND).abs() < 1e-10);
    }

    #[test]
    fn test_decay_toward_zero() {
        let mut store = PreferenceStore::new();
        store.adjust_skill("W1", "Electrical", 2.0);
        store.decay(0.5);
        assert!((store.skill_weight("W1", "Electrical") - 1.0).abs() < 1e-10);

        // Repeated decay eventually prunes the entry entirely.
        for _ in 0..20 {
            store.decay(0.5);
        }
        assert_eq!(store.skill_weight("W1", "Electrical"), 0.0);
    }

    #[test]
    fn test_task_weight_overrides_skill_weight() {
        let mut store = PreferenceStore::new();
        store.adjust_skill("W1", "Electrical", 2.0);
        store.adjust_task("W1", "T1", -1.0);

        let snap = store.snapshot();
        assert!((snap.preference("W1", "T1", "Electrical") + 1.0).abs() < 1e-10);
        // Other tasks of the same skill still read the skill weight.
        assert!((snap.preference("W1", "T2", "Electrical") - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_snapshot_isolated_from_later_writes() {
        let mut store = PreferenceStore::new();
        store.adjust_skill("W1", "Electrical", 1.0);
        let snap = store.snapshot();
        let version = snap.version();

        store.adjust_skill("W1", "Electrical", 3.0);
        assert!((snap.preference("W1", "T1", "Electrical") - 1.0).abs() < 1e-10);
        assert!(store.version() > version);
    }
}
