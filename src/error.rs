//! Engine error types.
//!
//! Only malformed input and internal invariant violations are surfaced
//! as errors. Infeasibility, budget exhaustion, and cancellation are
//! normal outcomes carried on the solve result instead.

use thiserror::Error;

use crate::validation::ValidationError;

/// Fatal solve failures.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The input snapshot is malformed; no search was attempted.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The solver configuration is unusable; no search was attempted.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The engine produced a schedule its own feasibility evaluator
    /// rejects. Always a bug.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Lifecycle transition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// No schedule exists for this horizon yet.
    #[error("no schedule has been generated for this horizon")]
    NoSchedule,

    /// The schedule is finalized and locked against edits.
    #[error("schedule is finalized; reopen before editing")]
    Finalized,

    /// The schedule is not finalized, so there is nothing to reopen.
    #[error("schedule is not finalized")]
    NotFinalized,

    /// The referenced task is not part of the current schedule's input.
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// The referenced worker is not part of the current snapshot.
    #[error("unknown worker '{0}'")]
    UnknownWorker(String),

    /// The rule set changed after the current draft was generated.
    #[error("rule set changed since the last generate; a fresh draft is required")]
    StaleRules,
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
