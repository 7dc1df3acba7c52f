//! Anytime assignment search engine.
//!
//! The solver turns an immutable snapshot of workers, tasks, rules, and
//! learned preferences into one week's schedule. It is bounded by a
//! wall-clock budget, cancellable, and deterministic for identical
//! inputs and configuration.

mod config;
mod engine;

pub use config::SolverConfig;
pub use engine::{SolveQuality, SolveResult, Solver};
