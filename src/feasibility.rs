//! Hard-constraint feasibility evaluator.
//!
//! Pure functions deciding whether a candidate (task, worker, day)
//! pairing may be added to a partial schedule. No side effects; safe to
//! call concurrently; idempotent for identical inputs.
//!
//! # Hard constraints
//! 1. The worker holds the task's required skill.
//! 2. The day is within the worker's availability and not a leave day.
//! 3. The pairing does not push the worker past their weekly shift cap.
//! 4. The worker has free capacity on that day.
//! 5. The day meets the task's deadline, if any.

use serde::{Deserialize, Serialize};

use crate::models::{RuleSet, Schedule, Task, Worker, HORIZON_DAYS};

/// The hard constraint a candidate pairing violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintViolation {
    /// The worker lacks the task's required skill.
    SkillMissing,
    /// The day is outside the worker's availability or a leave day.
    WorkerUnavailable,
    /// The pairing would exceed the worker's weekly shift cap.
    MaxShiftsExceeded,
    /// The worker already holds a full day's capacity of tasks.
    DayAtCapacity,
    /// The day falls after the task's deadline.
    DeadlineMissed,
    /// The assignment references a task or worker not in the input.
    /// Only reported by [`validate_schedule`].
    UnknownReference,
}

/// Checks a candidate pairing against a partial schedule.
///
/// Returns the first violated constraint, or `None` when the pairing is
/// feasible. Constraints are checked in the order listed in the module
/// doc, so the reported violation is the cheapest one to explain.
///
/// The candidate task must not already be assigned in `partial`.
pub fn violation(
    task: &Task,
    worker: &Worker,
    day: u8,
    partial: &Schedule,
    rules: &RuleSet,
    capacity_per_day: u32,
) -> Option<ConstraintViolation> {
    if !worker.has_skill(&task.required_skill) {
        return Some(ConstraintViolation::SkillMissing);
    }
    if day >= HORIZON_DAYS || !worker.is_available_on(day) {
        return Some(ConstraintViolation::WorkerUnavailable);
    }
    if partial.shift_count(&worker.id) + 1 > rules.effective_max_shifts(worker) {
        return Some(ConstraintViolation::MaxShiftsExceeded);
    }
    if partial.tasks_on_day(&worker.id, day) + 1 > capacity_per_day {
        return Some(ConstraintViolation::DayAtCapacity);
    }
    if !task.meets_deadline(day) {
        return Some(ConstraintViolation::DeadlineMissed);
    }
    None
}

/// Whether a candidate pairing may be added to a partial schedule.
pub fn is_feasible(
    task: &Task,
    worker: &Worker,
    day: u8,
    partial: &Schedule,
    rules: &RuleSet,
    capacity_per_day: u32,
) -> bool {
    violation(task, worker, day, partial, rules, capacity_per_day).is_none()
}

/// Re-checks every assignment of a complete schedule.
///
/// Returns all `(task_id, violation)` pairs found. An empty result
/// means every assignment satisfies all five hard constraints.
/// Assignments naming a task or worker outside the input are reported
/// as [`ConstraintViolation::UnknownReference`].
pub fn validate_schedule(
    schedule: &Schedule,
    workers: &[Worker],
    tasks: &[Task],
    rules: &RuleSet,
    capacity_per_day: u32,
) -> Vec<(String, ConstraintViolation)> {
    let mut found = Vec::new();

    for a in &schedule.assignments {
        let (Some(task), Some(worker)) = (
            tasks.iter().find(|t| t.id == a.task_id),
            workers.iter().find(|w| w.id == a.worker_id),
        ) else {
            found.push((a.task_id.clone(), ConstraintViolation::UnknownReference));
            continue;
        };

        if !worker.has_skill(&task.required_skill) {
            found.push((a.task_id.clone(), ConstraintViolation::SkillMissing));
        }
        if a.day >= HORIZON_DAYS || !worker.is_available_on(a.day) {
            found.push((a.task_id.clone(), ConstraintViolation::WorkerUnavailable));
        }
        if schedule.shift_count(&worker.id) > rules.effective_max_shifts(worker) {
            found.push((a.task_id.clone(), ConstraintViolation::MaxShiftsExceeded));
        }
        if schedule.tasks_on_day(&worker.id, a.day) > capacity_per_day {
            found.push((a.task_id.clone(), ConstraintViolation::DayAtCapacity));
        }
        if !task.meets_deadline(a.day) {
            found.push((a.task_id.clone(), ConstraintViolation::DeadlineMissed));
        }
    }

    found
}
