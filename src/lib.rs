//! Weekly task-to-worker assignment engine.
//!
//! Turns a roster of workers (skills, availability, leave, shift caps)
//! and a backlog of tasks (required skill, priority, deadline) into one
//! week's schedule. Hard constraints are never violated; tasks with no
//! feasible pairing are reported unassigned rather than dropped. Soft
//! objectives — priority, deadline urgency, learned planner preference,
//! fair load spread — steer the search among feasible schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Worker`, `Task`, `RuleSet`,
//!   `Schedule`, `Assignment`
//! - **`validation`**: Input integrity checks before any solve
//! - **`feasibility`**: Pure hard-constraint evaluator
//! - **`scoring`**: Soft-objective utility of a candidate pairing
//! - **`preferences`**: Bounded, decaying learned preference weights
//! - **`solver`**: Anytime, parallel, cancellable search engine
//! - **`learning`**: Turns planner overrides into preference updates
//! - **`lifecycle`**: Draft → Edited → Finalized schedule flow
//!
//! # Example
//!
//! ```
//! use crewplan::lifecycle::ScheduleController;
//! use crewplan::models::{Priority, RuleSet, Task, Worker};
//! use crewplan::solver::{Solver, SolverConfig};
//!
//! let workers = vec![
//!     Worker::new("alice").with_skill("Electrical"),
//!     Worker::new("bob").with_skills(["Electrical", "Plumbing"]),
//! ];
//! let tasks = vec![
//!     Task::new("panel-check", "Electrical").with_priority(Priority::High),
//!     Task::new("pipe-fix", "Plumbing").with_deadline(2),
//! ];
//!
//! let solver = Solver::new(SolverConfig::default());
//! let mut controller = ScheduleController::new(workers, tasks, RuleSet::new(), solver);
//! let draft = controller.generate().unwrap();
//! assert!(draft.is_complete());
//! ```

pub mod error;
pub mod feasibility;
pub mod learning;
pub mod lifecycle;
pub mod models;
pub mod preferences;
pub mod scoring;
pub mod solver;
pub mod validation;

pub use error::{LifecycleError, SolveError};
pub use lifecycle::{ScheduleController, ScheduleState};
pub use models::{Assignment, Priority, RuleSet, Schedule, Task, Worker, HORIZON_DAYS};
pub use solver::{SolveQuality, SolveResult, Solver, SolverConfig};
