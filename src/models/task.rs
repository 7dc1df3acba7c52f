//! Task model.
//!
//! A task is a unit of work to be assigned to exactly one worker on one
//! day of the planning week. Each task names a single required skill and
//! carries a priority and an optional deadline.

use serde::{Deserialize, Serialize};

use super::HORIZON_DAYS;

/// Task priority, ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    /// Routine work.
    Low,
    /// Standard work.
    #[default]
    Medium,
    /// Must-do work; outranks any learned preference.
    High,
}

impl Priority {
    /// Fixed monotonic score contribution (High 3, Medium 2, Low 1).
    pub fn weight(self) -> f64 {
        match self {
            Priority::Low => 1.0,
            Priority::Medium => 2.0,
            Priority::High => 3.0,
        }
    }
}

/// A task to be assigned during the planning week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The single skill tag a worker must hold to take this task.
    pub required_skill: String,
    /// Scheduling priority.
    pub priority: Priority,
    /// Estimated duration in hours. Informational; does not constrain placement.
    pub duration_hours: Option<u32>,
    /// Latest day (inclusive, 0-based) this task may be scheduled.
    /// `None` = schedulable any day of the week.
    pub deadline: Option<u8>,
}

impl Task {
    /// Creates a task requiring the given skill, at medium priority.
    pub fn new(id: impl Into<String>, required_skill: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            required_skill: required_skill.into(),
            priority: Priority::Medium,
            duration_hours: None,
            deadline: None,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated duration in hours.
    pub fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    /// Sets the deadline (latest allowed day, 0-based).
    pub fn with_deadline(mut self, day: u8) -> Self {
        self.deadline = Some(day);
        self
    }

    /// Whether a day satisfies this task's deadline.
    pub fn meets_deadline(&self, day: u8) -> bool {
        match self.deadline {
            Some(deadline) => day <= deadline,
            None => true,
        }
    }

    /// Whether the deadline (if any) falls inside the planning week.
    pub fn deadline_in_horizon(&self) -> bool {
        self.deadline.is_none_or(|d| d < HORIZON_DAYS)
    }
}
