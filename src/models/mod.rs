//! Assignment domain models.
//!
//! Immutable snapshot types consumed by every other component: the
//! solver, the feasibility evaluator, the learning loop, and the
//! lifecycle controller all read these and never mutate them mid-solve.
//!
//! All days are 0-based indices into a fixed one-week horizon.

mod rules;
mod schedule;
mod task;
mod worker;

pub use rules::{RuleSet, DEFAULT_MAX_SHIFTS_PER_WEEK};
pub use schedule::{Assignment, Schedule};
pub use task::{Priority, Task};
pub use worker::Worker;

/// Length of the planning horizon in days.
pub const HORIZON_DAYS: u8 = 7;
