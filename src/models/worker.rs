//! Worker model.
//!
//! A worker is a person who can be assigned tasks during the planning
//! week. Each worker carries a skill set, a per-day availability mask,
//! leave days, and an optional personal cap on shifts per week.
//!
//! # Availability
//! A worker can be assigned on a day iff the availability mask is set
//! for that day AND the day is not a leave day. Leave always wins over
//! availability.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::HORIZON_DAYS;

/// A worker who can receive task assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Skill tags this worker holds.
    pub skills: Vec<String>,
    /// Per-day availability over the planning week (index 0 = first day).
    pub available_days: [bool; HORIZON_DAYS as usize],
    /// Days this worker is on leave. Overrides `available_days`.
    pub leave_days: HashSet<u8>,
    /// Personal cap on shifts per week. Overrides the rule set when present.
    pub max_shifts: Option<u32>,
}

impl Worker {
    /// Creates a worker available every day of the week.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            skills: Vec::new(),
            available_days: [true; HORIZON_DAYS as usize],
            leave_days: HashSet::new(),
            max_shifts: None,
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Adds several skill tags at once.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Marks a day of the week as unavailable (not leave; e.g. a part-time day off).
    pub fn without_day(mut self, day: u8) -> Self {
        if (day as usize) < self.available_days.len() {
            self.available_days[day as usize] = false;
        }
        self
    }

    /// Adds a leave day.
    pub fn with_leave_day(mut self, day: u8) -> Self {
        self.leave_days.insert(day);
        self
    }

    /// Sets the personal weekly shift cap.
    pub fn with_max_shifts(mut self, max_shifts: u32) -> Self {
        self.max_shifts = Some(max_shifts);
        self
    }

    /// Whether this worker holds a skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Whether this worker can be assigned on a day.
    ///
    /// Leave days override the availability mask. Days outside the
    /// planning week are never available.
    pub fn is_available_on(&self, day: u8) -> bool {
        if day >= HORIZON_DAYS || self.leave_days.contains(&day) {
            return false;
        }
        self.available_days[day as usize]
    }

    /// Whether this worker is on leave at any point during the week.
    pub fn has_leave(&self) -> bool {
        self.leave_days.iter().any(|&d| d < HORIZON_DAYS)
    }
}
