//! Schedule (solution) model.
//!
//! A schedule is one week's task-to-worker assignments plus the set of
//! tasks no feasible pairing existed for. Unassignable tasks are always
//! reported explicitly, never dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Worker;

/// A single task-worker-day pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task ID.
    pub task_id: String,
    /// Assigned worker ID.
    pub worker_id: String,
    /// Day of the planning week (0-based).
    pub day: u8,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(task_id: impl Into<String>, worker_id: impl Into<String>, day: u8) -> Self {
        Self {
            task_id: task_id.into(),
            worker_id: worker_id.into(),
            day,
        }
    }
}

/// One week's schedule: assignments plus explicitly unassigned tasks.
///
/// Invariant: a task ID appears at most once across `assignments`, and
/// never in both `assignments` and `unassigned`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Task-worker-day assignments.
    pub assignments: Vec<Assignment>,
    /// Task IDs for which no feasible pairing was found.
    pub unassigned: Vec<String>,
    /// Version stamp set by the lifecycle controller (0 = unversioned).
    pub version: u64,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Records a task as unassigned.
    pub fn add_unassigned(&mut self, task_id: impl Into<String>) {
        self.unassigned.push(task_id.into());
    }

    /// Finds the assignment for a task.
    pub fn assignment_for_task(&self, task_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// Returns all assignments for a worker.
    pub fn assignments_for_worker(&self, worker_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .collect()
    }

    /// Number of shifts a worker holds this week.
    pub fn shift_count(&self, worker_id: &str) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .count() as u32
    }

    /// Number of tasks a worker holds on a given day.
    pub fn tasks_on_day(&self, worker_id: &str, day: u8) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.worker_id == worker_id && a.day == day)
            .count() as u32
    }

    /// Replaces the worker on a task's assignment.
    ///
    /// Returns the displaced worker ID, or `None` if the task has no
    /// assignment.
    pub fn reassign(&mut self, task_id: &str, worker_id: &str) -> Option<String> {
        let slot = self.assignments.iter_mut().find(|a| a.task_id == task_id)?;
        let displaced = std::mem::replace(&mut slot.worker_id, worker_id.to_string());
        Some(displaced)
    }

    /// Per-worker assignment counts, including zero rows for idle workers.
    ///
    /// Only the given workers are counted; assignments referencing
    /// anyone else are ignored.
    pub fn utilization(&self, workers: &[Worker]) -> HashMap<String, u32> {
        let mut counts: HashMap<String, u32> = workers
            .iter()
            .map(|w| (w.id.clone(), 0))
            .collect();
        for a in &self.assignments {
            if let Some(count) = counts.get_mut(&a.worker_id) {
                *count += 1;
            }
        }
        counts
    }

    /// Spread between the most- and least-loaded worker.
    ///
    /// Idle workers count as zero. Returns 0 for an empty worker list.
    pub fn shift_spread(&self, workers: &[Worker]) -> u32 {
        let counts = self.utilization(workers);
        let max = counts.values().copied().max().unwrap_or(0);
        let min = counts.values().copied().min().unwrap_or(0);
        max - min
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every input task received an assignment.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}
