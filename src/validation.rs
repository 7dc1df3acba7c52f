//! Input validation for assignment problems.
//!
//! Checks structural integrity of workers, tasks, and rules before any
//! search begins. Detects:
//! - Duplicate IDs
//! - Blank required skills
//! - Zero shift caps
//! - Deadlines outside the planning week
//!
//! A skill that no worker holds is deliberately NOT an input error:
//! such tasks end up in the schedule's unassigned set.

use std::collections::HashSet;

use crate::models::{RuleSet, Task, Worker, HORIZON_DAYS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task has a blank required skill.
    MissingSkill,
    /// A shift cap resolves to zero.
    InvalidShiftCap,
    /// A deadline falls outside the planning week.
    DeadlineOutOfHorizon,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input snapshot for a solve.
///
/// Checks:
/// 1. No duplicate worker IDs
/// 2. No duplicate task IDs
/// 3. Every task names a non-blank required skill
/// 4. No worker's effective shift cap is zero
/// 5. Every deadline falls within the planning week
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(workers: &[Worker], tasks: &[Task], rules: &RuleSet) -> ValidationResult {
    let mut errors = Vec::new();

    let mut worker_ids = HashSet::new();
    for w in workers {
        if !worker_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }
        if rules.effective_max_shifts(w) == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShiftCap,
                format!("Worker '{}' has a zero shift cap", w.id),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", t.id),
            ));
        }
        if t.required_skill.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSkill,
                format!("Task '{}' has a blank required skill", t.id),
            ));
        }
        if !t.deadline_in_horizon() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DeadlineOutOfHorizon,
                format!(
                    "Task '{}' has deadline day {} outside the {HORIZON_DAYS}-day week",
                    t.id,
                    t.deadline.unwrap_or_default(),
                ),
            ));
        }
    }

    if rules.max_shifts_per_week == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidShiftCap,
            "Global max shifts per week is zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
