//! Anytime assignment search.
//!
//! # Algorithm
//!
//! 1. Greedy construction: tasks in priority order, each placed on the
//!    best-scoring feasible (worker, day) pair. Restart 0 uses the
//!    deterministic priority order; later restarts shuffle it.
//! 2. Hill-climbing improvement per restart: relocate one assignment,
//!    swap the workers of two assignments, or insert an unassigned
//!    task. A move is kept only when it assigns more tasks or raises
//!    the objective.
//! 3. Restarts run in parallel over read-only snapshots; a shared
//!    incumbent is replaced under a lock whenever a restart finds a
//!    strictly better schedule (ties go to the lower restart index, so
//!    the outcome does not depend on thread completion order).
//!
//! The search is interruptible: a wall-clock deadline and a cooperative
//! cancellation flag are checked every iteration, and the incumbent is
//! returned in all cases.
//!
//! # Objective
//!
//! `sum of assignment scores - fairness_weight * max(0, spread - tolerance)`
//! where spread is the difference between the most- and least-loaded
//! worker's shift count. Assigning more tasks always outranks raising
//! the objective.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::SolverConfig;
use crate::error::SolveError;
use crate::feasibility;
use crate::models::{Assignment, RuleSet, Schedule, Task, Worker, HORIZON_DAYS};
use crate::preferences::PreferenceSnapshot;
use crate::scoring::Scorer;
use crate::validation::validate_input;

const EPS: f64 = 1e-9;

/// Quality of a returned schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveQuality {
    /// The objective matches the computed upper bound.
    Optimal,
    /// Every task is assigned; the bound was not reached.
    /// `gap` is the relative distance to the bound, `None` if unknown.
    Feasible { gap: Option<f64> },
    /// One or more tasks had no feasible pairing and were left
    /// unassigned. Never an error.
    InfeasiblePartial,
}

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The best schedule found.
    pub schedule: Schedule,

    /// Solution quality classification.
    pub quality: SolveQuality,

    /// Objective value of the schedule (score sum minus fairness penalty).
    pub objective: f64,

    /// Total improvement iterations across all restarts.
    pub iterations: usize,

    /// Number of restarts launched.
    pub restarts: usize,

    /// Wall-clock time spent.
    pub elapsed: Duration,

    /// Whether the caller's cancellation flag was observed.
    pub cancelled: bool,

    /// Whether the wall-clock budget expired before the search finished
    /// on its own.
    pub budget_exhausted: bool,
}

/// The assignment search engine.
///
/// Holds only configuration; every solve works on caller-provided
/// immutable snapshots, so re-solves after rule or override changes
/// always start fresh and never patch a stale solution.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves one week's assignment problem.
    ///
    /// Returns a schedule covering every input task (assigned or
    /// explicitly unassigned) within the configured budget.
    ///
    /// # Errors
    /// `InvalidInput`/`InvalidConfig` before any search; `Invariant` if
    /// the produced schedule fails its own feasibility re-check.
    pub fn solve(
        &self,
        workers: &[Worker],
        tasks: &[Task],
        rules: &RuleSet,
        preferences: &PreferenceSnapshot,
    ) -> Result<SolveResult, SolveError> {
        self.solve_with_cancel(workers, tasks, rules, preferences, None)
    }

    /// Solves with an optional cooperative cancellation flag.
    ///
    /// When the flag is set, all restarts stop promptly and the
    /// incumbent at that point is returned.
    pub fn solve_with_cancel(
        &self,
        workers: &[Worker],
        tasks: &[Task],
        rules: &RuleSet,
        preferences: &PreferenceSnapshot,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult, SolveError> {
        self.config.validate().map_err(SolveError::InvalidConfig)?;
        validate_input(workers, tasks, rules).map_err(SolveError::InvalidInput)?;

        let started = Instant::now();
        let deadline = started + self.config.budget;
        let scorer = Scorer::new(self.config.weights, preferences);
        let ctx = SearchContext::new(workers, tasks, rules, scorer, &self.config);

        let incumbent = Incumbent::new();
        let iterations = AtomicUsize::new(0);
        let budget_hit = AtomicBool::new(false);

        (0..self.config.restarts).into_par_iter().for_each(|restart| {
            if is_cancelled(&cancel) {
                return;
            }
            let mut rng = StdRng::seed_from_u64(
                self.config
                    .seed
                    .wrapping_add((restart as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
            );

            let order = if restart == 0 {
                ctx.priority_order()
            } else {
                let mut order = ctx.priority_order();
                order.shuffle(&mut rng);
                order
            };

            let mut schedule = ctx.greedy_construct(&order);
            incumbent.offer(&schedule, ctx.objective(&schedule), restart);

            ctx.improve(
                &mut schedule,
                &mut rng,
                deadline,
                &cancel,
                self.config.max_iterations,
                &iterations,
                &budget_hit,
                &incumbent,
                restart,
            );
        });

        let cancelled = is_cancelled(&cancel);
        let candidate = incumbent.into_best().unwrap_or_else(|| Candidate {
            objective: 0.0,
            restart: 0,
            schedule: all_unassigned(tasks),
        });
        let schedule = candidate.schedule;
        let objective = candidate.objective;

        self.check_invariants(&schedule, workers, tasks, rules)?;

        let bound = ctx.upper_bound();
        let quality = classify(&schedule, objective, bound);
        let elapsed = started.elapsed();

        info!(
            assigned = schedule.assignment_count(),
            unassigned = schedule.unassigned.len(),
            objective,
            iterations = iterations.load(Ordering::Relaxed),
            elapsed_ms = elapsed.as_millis() as u64,
            ?quality,
            "solve finished"
        );

        Ok(SolveResult {
            schedule,
            quality,
            objective,
            iterations: iterations.load(Ordering::Relaxed),
            restarts: self.config.restarts,
            elapsed,
            cancelled,
            budget_exhausted: budget_hit.load(Ordering::Relaxed),
        })
    }

    /// Re-checks the produced schedule with the public feasibility
    /// evaluator and verifies the assigned/unassigned partition.
    fn check_invariants(
        &self,
        schedule: &Schedule,
        workers: &[Worker],
        tasks: &[Task],
        rules: &RuleSet,
    ) -> Result<(), SolveError> {
        let violations = feasibility::validate_schedule(
            schedule,
            workers,
            tasks,
            rules,
            self.config.capacity_per_day,
        );
        if let Some((task_id, violation)) = violations.first() {
            return Err(SolveError::Invariant(format!(
                "schedule assignment for task '{task_id}' fails re-check: {violation:?}"
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for a in &schedule.assignments {
            if !seen.insert(a.task_id.as_str()) {
                return Err(SolveError::Invariant(format!(
                    "task '{}' assigned more than once",
                    a.task_id
                )));
            }
        }
        for id in &schedule.unassigned {
            if !seen.insert(id.as_str()) {
                return Err(SolveError::Invariant(format!(
                    "task '{id}' both assigned and unassigned"
                )));
            }
        }
        let input: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        if seen != input {
            return Err(SolveError::Invariant(
                "assigned + unassigned tasks do not match the input task set".into(),
            ));
        }
        Ok(())
    }
}

fn is_cancelled(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn all_unassigned(tasks: &[Task]) -> Schedule {
    let mut schedule = Schedule::new();
    for t in tasks {
        schedule.add_unassigned(&t.id);
    }
    schedule
}

fn classify(schedule: &Schedule, objective: f64, bound: f64) -> SolveQuality {
    if !schedule.unassigned.is_empty() {
        return SolveQuality::InfeasiblePartial;
    }
    if bound - objective <= EPS.max(1e-6 * bound.abs()) {
        return SolveQuality::Optimal;
    }
    let gap = if bound > EPS {
        Some(((bound - objective) / bound).max(0.0))
    } else {
        None
    };
    SolveQuality::Feasible { gap }
}

/// Read-only per-solve state shared by all restarts.
struct SearchContext<'a> {
    workers: &'a [Worker],
    tasks: &'a [Task],
    rules: &'a RuleSet,
    scorer: Scorer<'a>,
    capacity: u32,
    fairness_weight: f64,
    /// Worker indices sorted by id, for deterministic tie-breaks.
    worker_order: Vec<usize>,
    task_by_id: HashMap<&'a str, &'a Task>,
}

impl<'a> SearchContext<'a> {
    fn new(
        workers: &'a [Worker],
        tasks: &'a [Task],
        rules: &'a RuleSet,
        scorer: Scorer<'a>,
        config: &SolverConfig,
    ) -> Self {
        let mut worker_order: Vec<usize> = (0..workers.len()).collect();
        worker_order.sort_by(|&a, &b| workers[a].id.cmp(&workers[b].id));
        let task_by_id = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        Self {
            workers,
            tasks,
            rules,
            scorer,
            capacity: config.capacity_per_day,
            fairness_weight: config.fairness_weight,
            worker_order,
            task_by_id,
        }
    }

    /// Task indices ordered by priority desc, deadline asc (none last),
    /// then id asc.
    fn priority_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by(|&a, &b| {
            let (ta, tb) = (&self.tasks[a], &self.tasks[b]);
            tb.priority
                .cmp(&ta.priority)
                .then_with(|| {
                    let da = ta.deadline.unwrap_or(u8::MAX);
                    let db = tb.deadline.unwrap_or(u8::MAX);
                    da.cmp(&db)
                })
                .then_with(|| ta.id.cmp(&tb.id))
        });
        order
    }

    /// Mirrors `feasibility::violation` without cloning the schedule;
    /// `skip` are assignment indices excluded from the load counts
    /// (slots being moved by the current trial).
    fn placement_feasible(
        &self,
        assignments: &[Assignment],
        skip: &[usize],
        task: &Task,
        worker: &Worker,
        day: u8,
    ) -> bool {
        if !worker.has_skill(&task.required_skill)
            || day >= HORIZON_DAYS
            || !worker.is_available_on(day)
            || !task.meets_deadline(day)
        {
            return false;
        }
        let mut week = 0u32;
        let mut on_day = 0u32;
        for (i, a) in assignments.iter().enumerate() {
            if skip.contains(&i) || a.worker_id != worker.id {
                continue;
            }
            week += 1;
            if a.day == day {
                on_day += 1;
            }
        }
        week < self.rules.effective_max_shifts(worker) && on_day < self.capacity
    }

    /// Best feasible (worker index, day) for a task against a partial
    /// schedule. Ties: fewer shifts so far, then lowest worker id (via
    /// `worker_order`), then earliest day.
    fn best_placement(&self, schedule: &Schedule, task: &Task) -> Option<(usize, u8)> {
        let mut best: Option<(f64, u32, usize, u8)> = None;
        for &wi in &self.worker_order {
            let worker = &self.workers[wi];
            let Some(day) = (0..HORIZON_DAYS)
                .find(|&d| self.placement_feasible(&schedule.assignments, &[], task, worker, d))
            else {
                continue;
            };
            let score = self.scorer.score(task, worker);
            let shifts = schedule.shift_count(&worker.id);
            let better = match best {
                None => true,
                Some((bs, bshifts, _, _)) => {
                    score > bs + EPS || ((score - bs).abs() <= EPS && shifts < bshifts)
                }
            };
            if better {
                best = Some((score, shifts, wi, day));
            }
        }
        best.map(|(_, _, wi, day)| (wi, day))
    }

    /// Greedy construction over the given task order.
    fn greedy_construct(&self, order: &[usize]) -> Schedule {
        let mut schedule = Schedule::new();
        for &ti in order {
            let task = &self.tasks[ti];
            match self.best_placement(&schedule, task) {
                Some((wi, day)) => {
                    schedule.add_assignment(Assignment::new(
                        &task.id,
                        &self.workers[wi].id,
                        day,
                    ));
                }
                None => schedule.add_unassigned(&task.id),
            }
        }
        schedule
    }

    /// Objective: score sum minus the fairness penalty.
    fn objective(&self, schedule: &Schedule) -> f64 {
        let mut sum = 0.0;
        let mut loads: HashMap<&str, u32> =
            self.workers.iter().map(|w| (w.id.as_str(), 0)).collect();
        for a in &schedule.assignments {
            if let (Some(task), Some(worker)) = (
                self.task_by_id.get(a.task_id.as_str()),
                self.workers.iter().find(|w| w.id == a.worker_id),
            ) {
                sum += self.scorer.score(task, worker);
            }
            if let Some(load) = loads.get_mut(a.worker_id.as_str()) {
                *load += 1;
            }
        }
        let max = loads.values().copied().max().unwrap_or(0);
        let min = loads.values().copied().min().unwrap_or(0);
        let spread = max.saturating_sub(min);
        let excess = spread.saturating_sub(self.rules.fairness_tolerance) as f64;
        sum - self.fairness_weight * excess
    }

    /// Sum over tasks of the best feasible pair score in isolation.
    ///
    /// Ignores capacity interaction and the fairness penalty, so it is
    /// a valid upper bound on any achievable objective.
    fn upper_bound(&self) -> f64 {
        let empty = Schedule::new();
        self.tasks
            .iter()
            .map(|task| {
                self.workers
                    .iter()
                    .filter(|w| {
                        (0..HORIZON_DAYS).any(|d| {
                            self.placement_feasible(&empty.assignments, &[], task, w, d)
                        })
                    })
                    .map(|w| self.scorer.score(task, w))
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .filter(|s| s.is_finite())
            .sum()
    }

    /// Hill-climbing improvement loop for one restart.
    #[allow(clippy::too_many_arguments)]
    fn improve(
        &self,
        schedule: &mut Schedule,
        rng: &mut StdRng,
        deadline: Instant,
        cancel: &Option<Arc<AtomicBool>>,
        max_iterations: usize,
        iterations: &AtomicUsize,
        budget_hit: &AtomicBool,
        incumbent: &Incumbent,
        restart: usize,
    ) {
        let cap = if max_iterations == 0 {
            usize::MAX
        } else {
            max_iterations
        };
        let mut current = self.objective(schedule);

        for _ in 0..cap {
            if is_cancelled(cancel) {
                break;
            }
            if Instant::now() >= deadline {
                budget_hit.store(true, Ordering::Relaxed);
                break;
            }
            iterations.fetch_add(1, Ordering::Relaxed);

            let improved = match rng.random_range(0..3u8) {
                0 => self.try_relocate(schedule, current, rng),
                1 => self.try_swap(schedule, current, rng),
                _ => self.try_insert(schedule),
            };

            if let Some(new_objective) = improved {
                current = new_objective;
                incumbent.offer(schedule, current, restart);
            }
        }
    }

    /// Moves one random assignment to a random feasible (worker, day).
    fn try_relocate(
        &self,
        schedule: &mut Schedule,
        current: f64,
        rng: &mut StdRng,
    ) -> Option<f64> {
        if schedule.assignments.is_empty() || self.workers.is_empty() {
            return None;
        }
        let i = rng.random_range(0..schedule.assignments.len());
        let wi = rng.random_range(0..self.workers.len());
        let day = rng.random_range(0..HORIZON_DAYS);
        let worker = &self.workers[wi];
        let task = *self.task_by_id.get(schedule.assignments[i].task_id.as_str())?;

        if schedule.assignments[i].worker_id == worker.id && schedule.assignments[i].day == day {
            return None;
        }
        if !self.placement_feasible(&schedule.assignments, &[i], task, worker, day) {
            return None;
        }

        let previous = schedule.assignments[i].clone();
        schedule.assignments[i].worker_id = worker.id.clone();
        schedule.assignments[i].day = day;

        let new_objective = self.objective(schedule);
        if new_objective > current + EPS {
            Some(new_objective)
        } else {
            schedule.assignments[i] = previous;
            None
        }
    }

    /// Swaps the workers of two random assignments.
    fn try_swap(&self, schedule: &mut Schedule, current: f64, rng: &mut StdRng) -> Option<f64> {
        if schedule.assignments.len() < 2 {
            return None;
        }
        let i = rng.random_range(0..schedule.assignments.len());
        let j = rng.random_range(0..schedule.assignments.len());
        if i == j || schedule.assignments[i].worker_id == schedule.assignments[j].worker_id {
            return None;
        }

        let wi = schedule.assignments[i].worker_id.clone();
        let wj = schedule.assignments[j].worker_id.clone();
        schedule.assignments[i].worker_id = wj.clone();
        schedule.assignments[j].worker_id = wi.clone();

        let feasible = self.assignment_ok(schedule, i) && self.assignment_ok(schedule, j);
        let new_objective = if feasible {
            self.objective(schedule)
        } else {
            f64::NEG_INFINITY
        };

        if feasible && new_objective > current + EPS {
            Some(new_objective)
        } else {
            schedule.assignments[i].worker_id = wi;
            schedule.assignments[j].worker_id = wj;
            None
        }
    }

    /// Inserts one unassigned task at its best feasible placement.
    /// Assigning a task always outranks the objective, so a successful
    /// insertion is accepted unconditionally.
    fn try_insert(&self, schedule: &mut Schedule) -> Option<f64> {
        let (ui, placement) = schedule
            .unassigned
            .iter()
            .enumerate()
            .find_map(|(ui, task_id)| {
                let task = *self.task_by_id.get(task_id.as_str())?;
                self.best_placement(schedule, task).map(|p| (ui, p))
            })?;

        let task_id = schedule.unassigned.remove(ui);
        let (wi, day) = placement;
        schedule.add_assignment(Assignment::new(task_id, &self.workers[wi].id, day));
        Some(self.objective(schedule))
    }

    /// Whether assignment `idx` is feasible against the rest of the
    /// schedule as it currently stands.
    fn assignment_ok(&self, schedule: &Schedule, idx: usize) -> bool {
        let a = &schedule.assignments[idx];
        let Some(task) = self.task_by_id.get(a.task_id.as_str()) else {
            return false;
        };
        let Some(worker) = self.workers.iter().find(|w| w.id == a.worker_id) else {
            return false;
        };
        self.placement_feasible(&schedule.assignments, &[idx], task, worker, a.day)
    }
}

struct Candidate {
    objective: f64,
    restart: usize,
    schedule: Schedule,
}

/// Shared best-so-far holder. Replaced only by schedules that assign
/// more tasks, or score strictly better, or tie while coming from a
/// lower restart index — so the winner is independent of thread timing.
struct Incumbent(Mutex<Option<Candidate>>);

impl Incumbent {
    fn new() -> Self {
        Self(Mutex::new(None))
    }

    fn offer(&self, schedule: &Schedule, objective: f64, restart: usize) {
        let mut guard = self.0.lock().unwrap_or_else(|p| p.into_inner());
        let better = match guard.as_ref() {
            None => true,
            Some(best) => {
                let assigned = schedule.assignment_count();
                let best_assigned = best.schedule.assignment_count();
                assigned > best_assigned
                    || (assigned == best_assigned && objective > best.objective + EPS)
                    || (assigned == best_assigned
                        && (objective - best.objective).abs() <= EPS
                        && restart < best.restart)
            }
        };
        if better {
            debug!(
                objective,
                restart,
                assigned = schedule.assignment_count(),
                "incumbent improved"
            );
            *guard = Some(Candidate {
                objective,
                restart,
                schedule: schedule.clone(),
            });
        }
    }

    fn into_best(self) -> Option<Candidate> {
        self.0.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::preferences::PreferenceStore;
    use proptest::prelude::*;

    fn quick_config() -> SolverConfig {
        SolverConfig::default()
            .with_budget(Duration::from_secs(10))
            .with_max_iterations(2_000)
            .with_restarts(2)
    }

    fn neutral() -> PreferenceSnapshot {
        PreferenceStore::new().snapshot()
    }

    fn crew() -> Vec<Worker> {
        vec![
            Worker::new("A").with_skill("Electrical"),
            Worker::new("B").with_skills(["Electrical", "Inspection"]),
            Worker::new("C").with_skill("Plumbing"),
        ]
    }

    #[test]
    fn test_every_assignment_is_feasible() {
        let workers = crew();
        let tasks = vec![
            Task::new("T1", "Electrical").with_priority(Priority::High).with_deadline(2),
            Task::new("T2", "Inspection"),
            Task::new("T3", "Plumbing").with_deadline(5),
            Task::new("T4", "Electrical"),
        ];
        let rules = RuleSet::new();
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &rules, &neutral())
            .unwrap();

        let violations =
            feasibility::validate_schedule(&result.schedule, &workers, &tasks, &rules, 1);
        assert!(violations.is_empty(), "violations: {violations:?}");
        assert!(result.schedule.is_complete());
    }

    #[test]
    fn test_assigned_plus_unassigned_partition() {
        let workers = vec![Worker::new("A").with_skill("Electrical").with_max_shifts(1)];
        let tasks = vec![
            Task::new("T1", "Electrical"),
            Task::new("T2", "Electrical"),
            Task::new("T3", "Welding"),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        let mut covered: Vec<&str> = result
            .schedule
            .assignments
            .iter()
            .map(|a| a.task_id.as_str())
            .chain(result.schedule.unassigned.iter().map(String::as_str))
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, vec!["T1", "T2", "T3"]);
        assert_eq!(result.schedule.assignment_count(), 1);
    }

    #[test]
    fn test_unknown_skill_left_unassigned_without_error() {
        let workers = crew();
        let tasks = vec![Task::new("T2", "Welding")];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(result.schedule.unassigned, vec!["T2".to_string()]);
        assert_eq!(result.quality, SolveQuality::InfeasiblePartial);
    }

    #[test]
    fn test_max_shifts_cap_never_exceeded() {
        // Only C can do Plumbing and C caps at 2: the third task must
        // stay unassigned, never overload C.
        let workers = vec![Worker::new("C").with_skill("Plumbing").with_max_shifts(2)];
        let tasks = vec![
            Task::new("T1", "Plumbing"),
            Task::new("T2", "Plumbing"),
            Task::new("T3", "Plumbing"),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(result.schedule.shift_count("C"), 2);
        assert_eq!(result.schedule.unassigned.len(), 1);
    }

    #[test]
    fn test_tie_breaks_to_lowest_worker_id() {
        // A and B tie on score with zero shifts each: A wins.
        let workers = vec![
            Worker::new("A").with_skill("Electrical"),
            Worker::new("B").with_skills(["Electrical", "Inspection"]),
        ];
        let tasks = vec![
            Task::new("T1", "Electrical").with_priority(Priority::High).with_deadline(3),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(
            result.schedule.assignment_for_task("T1").unwrap().worker_id,
            "A"
        );
    }

    #[test]
    fn test_learned_preference_flips_the_pick() {
        let workers = vec![
            Worker::new("A").with_skill("Electrical"),
            Worker::new("B").with_skills(["Electrical", "Inspection"]),
        ];
        let tasks = vec![
            Task::new("T1", "Electrical").with_priority(Priority::High).with_deadline(3),
        ];
        let mut store = PreferenceStore::new();
        store.adjust_skill("B", "Electrical", 3.0);

        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &store.snapshot())
            .unwrap();

        assert_eq!(
            result.schedule.assignment_for_task("T1").unwrap().worker_id,
            "B"
        );
    }

    #[test]
    fn test_identical_inputs_reproduce_identical_schedules() {
        let workers = crew();
        let tasks = vec![
            Task::new("T1", "Electrical").with_priority(Priority::High),
            Task::new("T2", "Electrical"),
            Task::new("T3", "Inspection").with_deadline(4),
            Task::new("T4", "Plumbing").with_priority(Priority::Low),
        ];
        let snap = neutral();
        let solver = Solver::new(quick_config());

        let first = solver.solve(&workers, &tasks, &RuleSet::new(), &snap).unwrap();
        let second = solver.solve(&workers, &tasks, &RuleSet::new(), &snap).unwrap();

        assert_eq!(first.schedule.assignments, second.schedule.assignments);
        assert_eq!(first.schedule.unassigned, second.schedule.unassigned);
        assert!((first.objective - second.objective).abs() < 1e-12);
    }

    #[test]
    fn test_high_priority_wins_scarce_capacity() {
        let workers = vec![Worker::new("A").with_skill("Electrical").with_max_shifts(1)];
        let tasks = vec![
            Task::new("low", "Electrical").with_priority(Priority::Low),
            Task::new("high", "Electrical").with_priority(Priority::High),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert!(result.schedule.assignment_for_task("high").is_some());
        assert_eq!(result.schedule.unassigned, vec!["low".to_string()]);
    }

    #[test]
    fn test_fairness_tie_break_spreads_load() {
        // Identical workers and identical tasks: the fewer-shifts
        // tie-break alternates assignments instead of loading one worker.
        let workers = vec![
            Worker::new("A").with_skill("S"),
            Worker::new("B").with_skill("S"),
        ];
        let tasks = vec![
            Task::new("T1", "S"),
            Task::new("T2", "S"),
            Task::new("T3", "S"),
            Task::new("T4", "S"),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(result.schedule.shift_count("A"), 2);
        assert_eq!(result.schedule.shift_count("B"), 2);
    }

    #[test]
    fn test_invalid_input_rejected_before_search() {
        let workers = vec![Worker::new("A"), Worker::new("A")];
        let tasks = vec![Task::new("T1", "S")];
        let err = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap_err();
        assert!(matches!(err, SolveError::InvalidInput(_)));
    }

    #[test]
    fn test_preset_cancellation_returns_promptly() {
        let workers = crew();
        let tasks = vec![Task::new("T1", "Electrical")];
        let cancel = Arc::new(AtomicBool::new(true));

        let result = Solver::new(quick_config())
            .solve_with_cancel(&workers, &tasks, &RuleSet::new(), &neutral(), Some(cancel))
            .unwrap();

        assert!(result.cancelled);
        // No restart ran: everything is reported unassigned, not dropped.
        assert_eq!(result.schedule.unassigned.len(), 1);
    }

    #[test]
    fn test_small_instance_reaches_optimal() {
        let workers = vec![
            Worker::new("A").with_skill("S"),
            Worker::new("B").with_skill("S"),
        ];
        let tasks = vec![Task::new("T1", "S"), Task::new("T2", "S")];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(result.quality, SolveQuality::Optimal);
    }

    #[test]
    fn test_empty_inputs() {
        let result = Solver::new(quick_config())
            .solve(&[], &[], &RuleSet::new(), &neutral())
            .unwrap();
        assert_eq!(result.schedule.assignment_count(), 0);
        assert!(result.schedule.is_complete());
        assert_eq!(result.quality, SolveQuality::Optimal);
    }

    #[test]
    fn test_leave_days_respected_under_pressure() {
        // Worker on leave most of the week: assignments land only on
        // the remaining days.
        let workers = vec![Worker::new("A")
            .with_skill("S")
            .with_leave_day(0)
            .with_leave_day(1)
            .with_leave_day(2)
            .with_leave_day(3)
            .with_leave_day(4)];
        let tasks = vec![
            Task::new("T1", "S"),
            Task::new("T2", "S"),
            Task::new("T3", "S"),
        ];
        let result = Solver::new(quick_config())
            .solve(&workers, &tasks, &RuleSet::new(), &neutral())
            .unwrap();

        assert_eq!(result.schedule.assignment_count(), 2);
        for a in &result.schedule.assignments {
            assert!(a.day >= 5);
        }
        assert_eq!(result.schedule.unassigned.len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_returned_schedules_always_validate(
            seed in 0u64..500,
            n_workers in 1usize..5,
            n_tasks in 0usize..10,
        ) {
            let skills = ["Electrical", "Plumbing", "Inspection", "Welding"];
            let mut rng = StdRng::seed_from_u64(seed);

            let workers: Vec<Worker> = (0..n_workers)
                .map(|i| {
                    let mut w = Worker::new(format!("W{i}"))
                        .with_skill(skills[rng.random_range(0..skills.len())]);
                    if rng.random_range(0..3u8) == 0 {
                        w = w.with_leave_day(rng.random_range(0..HORIZON_DAYS));
                    }
                    if rng.random_range(0..3u8) == 0 {
                        w = w.with_max_shifts(rng.random_range(1..4u32));
                    }
                    w
                })
                .collect();

            let tasks: Vec<Task> = (0..n_tasks)
                .map(|i| {
                    let mut t = Task::new(
                        format!("T{i}"),
                        skills[rng.random_range(0..skills.len())],
                    );
                    if rng.random_range(0..2u8) == 0 {
                        t = t.with_deadline(rng.random_range(0..HORIZON_DAYS));
                    }
                    t
                })
                .collect();

            let rules = RuleSet::new();
            let config = SolverConfig::default()
                .with_budget(Duration::from_secs(10))
                .with_max_iterations(500)
                .with_restarts(2)
                .with_seed(seed);
            let result = Solver::new(config)
                .solve(&workers, &tasks, &rules, &neutral())
                .unwrap();

            let violations =
                feasibility::validate_schedule(&result.schedule, &workers, &tasks, &rules, 1);
            prop_assert!(violations.is_empty(), "violations: {violations:?}");

            let covered = result.schedule.assignment_count() + result.schedule.unassigned.len();
            prop_assert_eq!(covered, n_tasks);
        }
    }
}
