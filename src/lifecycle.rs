//! Schedule lifecycle: draft, edit, finalize.
//!
//! The controller owns the week's planning state: the worker and task
//! snapshot, the rule set, the preference store, and the current
//! schedule. A schedule moves Draft → Edited (on the first planner
//! override) → Finalized, and may be reopened for further edits.
//!
//! Overrides are recorded in an append-only log and fed to the learning
//! loop exactly once, at finalize. Regenerating discards the current
//! draft and its log; learned preferences survive, so the next draft
//! already reflects past horizons.

use tracing::{debug, info};

use crate::error::{LifecycleError, SolveError};
use crate::feasibility;
use crate::learning::{LearningLoop, OverrideRecord};
use crate::models::{Assignment, RuleSet, Schedule, Task, Worker, HORIZON_DAYS};
use crate::preferences::PreferenceStore;
use crate::solver::{SolveQuality, Solver};

/// Where the current schedule sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// Produced by the engine, untouched by the planner.
    Draft,
    /// At least one planner override has been applied.
    Edited,
    /// Locked. Overrides rejected until reopened.
    Finalized,
}

/// Drives one planning horizon at a time.
#[derive(Debug)]
pub struct ScheduleController {
    workers: Vec<Worker>,
    tasks: Vec<Task>,
    rules: RuleSet,
    solver: Solver,
    preferences: PreferenceStore,
    learning: LearningLoop,

    schedule: Option<Schedule>,
    state: ScheduleState,
    last_quality: Option<SolveQuality>,

    override_log: Vec<OverrideRecord>,
    /// Log entries before this index were already fed to the learning
    /// loop at an earlier finalize of this horizon.
    consumed: usize,
    decayed_this_horizon: bool,

    rules_dirty: bool,
    next_version: u64,
    next_seq: u64,
}

impl ScheduleController {
    /// Creates a controller over a snapshot of workers, tasks, and rules.
    pub fn new(workers: Vec<Worker>, tasks: Vec<Task>, rules: RuleSet, solver: Solver) -> Self {
        Self {
            workers,
            tasks,
            rules,
            solver,
            preferences: PreferenceStore::new(),
            learning: LearningLoop::new(),
            schedule: None,
            state: ScheduleState::Draft,
            last_quality: None,
            override_log: Vec::new(),
            consumed: 0,
            decayed_this_horizon: false,
            rules_dirty: false,
            next_version: 0,
            next_seq: 0,
        }
    }

    /// Replaces the default learning loop.
    pub fn with_learning(mut self, learning: LearningLoop) -> Self {
        self.learning = learning;
        self
    }

    /// The current schedule, if one has been generated.
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Lifecycle state of the current schedule.
    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Quality reported by the last generate.
    pub fn last_quality(&self) -> Option<SolveQuality> {
        self.last_quality
    }

    /// The learned preference store. Written only via overrides.
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Overrides recorded against the current schedule and not yet
    /// consumed by a finalize.
    pub fn pending_override_count(&self) -> usize {
        self.override_log.len() - self.consumed
    }

    /// Per-worker assignment counts for the current schedule, zero rows
    /// included.
    pub fn utilization(&self) -> Option<std::collections::HashMap<String, u32>> {
        self.schedule.as_ref().map(|s| s.utilization(&self.workers))
    }

    /// Replaces the rule set. The current schedule, if any, becomes
    /// stale: it must be regenerated before it can be finalized.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
        self.rules_dirty = self.schedule.is_some();
    }

    /// Generates a fresh draft for this horizon.
    ///
    /// Discards the current schedule and its override log. Learned
    /// preferences carry over, so planner corrections from earlier
    /// horizons shape this draft.
    pub fn generate(&mut self) -> Result<&Schedule, SolveError> {
        let snapshot = self.preferences.snapshot();
        let result = self
            .solver
            .solve(&self.workers, &self.tasks, &self.rules, &snapshot)?;

        self.next_version += 1;
        let mut schedule = result.schedule;
        schedule.version = self.next_version;

        info!(
            version = schedule.version,
            assigned = schedule.assignment_count(),
            unassigned = schedule.unassigned.len(),
            "draft generated"
        );

        self.last_quality = Some(result.quality);
        self.state = ScheduleState::Draft;
        self.override_log.clear();
        self.consumed = 0;
        self.decayed_this_horizon = false;
        self.rules_dirty = false;
        Ok(self.schedule.insert(schedule))
    }

    /// Applies a planner override: the task goes to `worker_id`.
    ///
    /// Reassigning a task to the worker it already has is a no-op. An
    /// unassigned task is placed on the worker's first feasible day, or
    /// their first available day when the planner overrules feasibility.
    /// The override is logged for the learning loop; it is consumed at
    /// the next finalize.
    pub fn override_assignment(
        &mut self,
        task_id: &str,
        worker_id: &str,
    ) -> Result<(), LifecycleError> {
        if self.schedule.is_none() {
            return Err(LifecycleError::NoSchedule);
        }
        if self.state == ScheduleState::Finalized {
            return Err(LifecycleError::Finalized);
        }
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return Err(LifecycleError::UnknownTask(task_id.to_string()));
        };
        let Some(worker) = self.workers.iter().find(|w| w.id == worker_id) else {
            return Err(LifecycleError::UnknownWorker(worker_id.to_string()));
        };
        let Some(schedule) = self.schedule.as_mut() else {
            return Err(LifecycleError::NoSchedule);
        };

        if schedule
            .assignment_for_task(task_id)
            .is_some_and(|a| a.worker_id == worker_id)
        {
            return Ok(());
        }

        let from_worker = schedule.reassign(task_id, worker_id);
        if from_worker.is_none() {
            // Previously unassigned: the planner's pick wins even when
            // the engine found no feasible slot.
            let capacity = self.solver.config().capacity_per_day;
            let day = (0..HORIZON_DAYS)
                .find(|&d| feasibility::is_feasible(task, worker, d, schedule, &self.rules, capacity))
                .or_else(|| (0..HORIZON_DAYS).find(|&d| worker.is_available_on(d)))
                .unwrap_or(0);
            schedule.unassigned.retain(|t| t != task_id);
            schedule.add_assignment(Assignment::new(task_id, worker_id, day));
        }

        self.next_version += 1;
        schedule.version = self.next_version;

        self.override_log.push(OverrideRecord {
            task_id: task_id.to_string(),
            from_worker: from_worker.clone(),
            to_worker: worker_id.to_string(),
            schedule_version: schedule.version,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.state = ScheduleState::Edited;

        debug!(
            task = task_id,
            to = worker_id,
            from = from_worker.as_deref().unwrap_or("-"),
            "override applied"
        );
        Ok(())
    }

    /// Finalizes the current schedule.
    ///
    /// Feeds every not-yet-consumed override to the learning loop, then
    /// decays the store once for the horizon. Fails if the rule set
    /// changed since the draft was generated.
    pub fn finalize(&mut self) -> Result<&Schedule, LifecycleError> {
        if self.schedule.is_none() {
            return Err(LifecycleError::NoSchedule);
        }
        if self.state == ScheduleState::Finalized {
            return Err(LifecycleError::Finalized);
        }
        if self.rules_dirty {
            return Err(LifecycleError::StaleRules);
        }

        let pending = &self.override_log[self.consumed..];
        let tasks = &self.tasks;
        self.learning
            .apply_all(&mut self.preferences, pending, |task_id| {
                tasks
                    .iter()
                    .find(|t| t.id == task_id)
                    .map(|t| t.required_skill.as_str())
            });
        let learned = pending.len();
        self.consumed = self.override_log.len();

        if !self.decayed_this_horizon {
            self.learning.end_of_horizon(&mut self.preferences);
            self.decayed_this_horizon = true;
        }
        self.state = ScheduleState::Finalized;

        info!(overrides = learned, "schedule finalized");
        match &self.schedule {
            Some(s) => Ok(s),
            None => Err(LifecycleError::NoSchedule),
        }
    }

    /// Unlocks a finalized schedule for further edits.
    ///
    /// Already-consumed overrides are not re-learned at the next
    /// finalize; only edits made after the reopen are.
    pub fn reopen(&mut self) -> Result<(), LifecycleError> {
        if self.schedule.is_none() {
            return Err(LifecycleError::NoSchedule);
        }
        if self.state != ScheduleState::Finalized {
            return Err(LifecycleError::NotFinalized);
        }
        self.state = ScheduleState::Edited;
        Ok(())
    }
}
