//! Branch-and-bound search.
//!
//! Depth-first search over partial assignments, after one AC-3 pass:
//!
//! 1. Branch on the unassigned variable with the fewest remaining values.
//! 2. Try values cheapest-first when optimizing, in domain order otherwise.
//! 3. Skip objective values that cannot beat the incumbent.
//! 4. Check every constraint touching the new value against what is
//!    already assigned, then (optionally) forward-check binary neighbors.
//!
//! Forward checking removes values from working copies of the domains;
//! every removal is recorded on a trail and undone before the next
//! candidate is tried.

use super::model::{Assignment, Constraint, Direction, Problem};
use super::network::Network;
use super::propagation::{ArcConsistency, Propagation};
use super::trail::{Removal, Trail};
use super::variables::{Domain, Variable};
use crate::error::{CspError, Result};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Value of every registered variable.
    pub assignments: Assignment,
    /// Objective value, if the problem has a usable objective.
    pub objective_value: Option<i64>,
    /// The search ran to completion, so no feasible assignment is better.
    pub is_optimal: bool,
    /// The time or node budget ran out before the search completed.
    pub timed_out: bool,
    /// The search was stopped through the cancellation flag.
    pub cancelled: bool,
    /// Search nodes entered.
    pub nodes_explored: u64,
    /// Wall-clock time including propagation.
    pub elapsed: Duration,
}

impl Solution {
    pub fn time_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn value(&self, name: &str) -> Option<i64> {
        self.assignments.get(name).copied()
    }
}

/// Solver configuration.
///
/// # Examples
///
/// ```
/// use u_csp::cp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_time_limit_secs(2.5)
///     .with_node_limit(100_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget in seconds, propagation included.
    pub time_limit_secs: f64,
    /// Maximum search nodes. 0 = no limit.
    pub node_limit: u64,
    /// Prune binary neighbors after each assignment.
    pub forward_checking: bool,
    /// Reject constraints and objectives naming unregistered variables
    /// instead of treating those names as never assigned.
    pub strict: bool,
    /// Seed for random tie-breaking between equally constrained variables.
    /// `None` = earliest registered variable wins.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 60.0,
            node_limit: 0,
            forward_checking: true,
            strict: false,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = limit.as_secs_f64();
        self
    }

    pub fn with_node_limit(mut self, n: u64) -> Self {
        self.node_limit = n;
        self
    }

    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.time_limit_secs.is_finite() || self.time_limit_secs < 0.0 {
            return Err(CspError::InvalidConfig(format!(
                "time_limit_secs must be a non-negative number, got {}",
                self.time_limit_secs
            )));
        }
        Ok(())
    }

    fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::MAX)
    }
}

/// Trait for solver implementations.
pub trait CpSolver {
    /// Solves the problem. `Ok(None)` means no solution was found: the
    /// problem is infeasible, or the budget ran out first.
    fn solve(&self, problem: &mut Problem, config: &SolverConfig) -> Result<Option<Solution>>;
}

/// Exhaustive depth-first branch-and-bound.
///
/// Without an objective the first solution found is returned. With one,
/// the search continues until the tree is exhausted, the budget runs out,
/// or the caller cancels; only a completed search reports `is_optimal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    pub fn new() -> Self {
        Self
    }

    /// Solves with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the search
    /// stops at its next node and returns the best solution found so far.
    pub fn solve_with_cancel(
        &self,
        problem: &mut Problem,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Option<Solution>> {
        config.validate()?;
        if config.strict {
            problem.validate()?;
        }

        let start = Instant::now();

        if let Propagation::Wipeout { variable } = ArcConsistency::propagate(problem) {
            debug!("search skipped: '{variable}' has no consistent value");
            return Ok(None);
        }

        let objective = match problem.objective() {
            None => None,
            Some(o) => match problem.index_of(&o.variable) {
                Some(i) => Some((i, o.direction)),
                None => {
                    warn!(
                        "objective variable '{}' is not registered, accepting the first solution",
                        o.variable
                    );
                    None
                }
            },
        };

        let network = Network::build(problem);
        let mut search = Search {
            network: &network,
            constraints: problem.constraints(),
            objective,
            forward_checking: config.forward_checking,
            domains: problem
                .variables()
                .iter()
                .map(Variable::effective_domain)
                .collect(),
            assignment: vec![None; problem.variable_count()],
            trail: Trail::default(),
            ctx: SearchContext::new(start, config, cancel),
        };
        search.descend();
        let ctx = search.ctx;

        let elapsed = start.elapsed();
        debug!(
            "search finished: {} nodes in {:?}, interrupted: {:?}, incumbent: {:?}",
            ctx.nodes, elapsed, ctx.interrupted, ctx.best_value
        );

        let Some(values) = ctx.best else {
            return Ok(None);
        };
        let objective_value = objective.map(|(i, _)| values[i]);
        let assignments = problem
            .variables()
            .iter()
            .zip(values)
            .map(|(var, value)| (var.name.clone(), value))
            .collect();

        Ok(Some(Solution {
            assignments,
            objective_value,
            is_optimal: ctx.interrupted.is_none(),
            timed_out: matches!(
                ctx.interrupted,
                Some(Interrupt::TimeLimit | Interrupt::NodeLimit)
            ),
            cancelled: ctx.interrupted == Some(Interrupt::Cancelled),
            nodes_explored: ctx.nodes,
            elapsed,
        }))
    }
}

impl CpSolver for BranchAndBound {
    fn solve(&self, problem: &mut Problem, config: &SolverConfig) -> Result<Option<Solution>> {
        self.solve_with_cancel(problem, config, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    TimeLimit,
    NodeLimit,
    Cancelled,
}

/// State carried across the whole recursive search.
struct SearchContext {
    deadline: Option<Instant>,
    node_limit: u64,
    cancel: Option<Arc<AtomicBool>>,
    rng: Option<StdRng>,
    nodes: u64,
    best: Option<Vec<i64>>,
    best_value: Option<i64>,
    interrupted: Option<Interrupt>,
}

impl SearchContext {
    fn new(start: Instant, config: &SolverConfig, cancel: Option<Arc<AtomicBool>>) -> Self {
        Self {
            deadline: start.checked_add(config.time_limit()),
            node_limit: config.node_limit,
            cancel,
            rng: config.seed.map(StdRng::seed_from_u64),
            nodes: 0,
            best: None,
            best_value: None,
            interrupted: None,
        }
    }

    /// Polled on entry to every node.
    fn should_stop(&mut self) -> bool {
        if self.interrupted.is_some() {
            return true;
        }
        let cancelled = self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        self.interrupted = if cancelled {
            Some(Interrupt::Cancelled)
        } else if self.node_limit > 0 && self.nodes >= self.node_limit {
            Some(Interrupt::NodeLimit)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(Interrupt::TimeLimit)
        } else {
            None
        };
        self.interrupted.is_some()
    }
}

struct Search<'a> {
    network: &'a Network,
    constraints: &'a [Constraint],
    objective: Option<(usize, Direction)>,
    forward_checking: bool,
    /// Working copies; only forward checking mutates them.
    domains: Vec<Domain>,
    assignment: Vec<Option<i64>>,
    trail: Trail<Removal>,
    ctx: SearchContext,
}

impl Search<'_> {
    /// Explores the subtree under the current assignment. Returns `true`
    /// when the whole search must stop.
    fn descend(&mut self) -> bool {
        if self.ctx.should_stop() {
            return true;
        }
        self.ctx.nodes += 1;

        if let Some((obj, direction)) = self.objective {
            if let (Some(value), Some(best)) = (self.assignment[obj], self.ctx.best_value) {
                if !direction.improves(value, best) {
                    return false;
                }
            }
        }

        let Some(var) = self.select_variable() else {
            return self.record_leaf();
        };

        for value in self.ordered_values(var) {
            if self.cannot_improve(var, value) {
                // values are ordered best-first for the objective variable
                break;
            }

            self.assignment[var] = Some(value);
            if self.network.consistent(self.constraints, var, &self.assignment) {
                let checkpoint = self.trail.checkpoint();
                self.trail.new_checkpoint();

                let alive = !self.forward_checking || self.forward_check(var, value);
                let stop = alive && self.descend();
                self.undo(checkpoint);

                if stop {
                    self.assignment[var] = None;
                    return true;
                }
            }
            self.assignment[var] = None;
        }
        false
    }

    /// Smallest remaining domain first.
    fn select_variable(&mut self) -> Option<usize> {
        let mut selected = None;
        let mut smallest = usize::MAX;
        let mut ties = 0u32;

        for var in 0..self.assignment.len() {
            if self.assignment[var].is_some() {
                continue;
            }
            let size = self.domains[var].len();
            if size < smallest {
                selected = Some(var);
                smallest = size;
                ties = 1;
            } else if size == smallest {
                if let Some(rng) = self.ctx.rng.as_mut() {
                    ties += 1;
                    if rng.random_range(0..ties) == 0 {
                        selected = Some(var);
                    }
                }
            }
        }
        selected
    }

    fn ordered_values(&self, var: usize) -> Vec<i64> {
        let mut values = self.domains[var].values().to_vec();
        match self.objective {
            Some((obj, Direction::Max)) if obj == var => values.sort_unstable_by(|a, b| b.cmp(a)),
            Some(_) => values.sort_unstable(),
            None => {}
        }
        values
    }

    fn cannot_improve(&self, var: usize, value: i64) -> bool {
        match (self.objective, self.ctx.best_value) {
            (Some((obj, direction)), Some(best)) if obj == var => !direction.improves(value, best),
            _ => false,
        }
    }

    /// Removes values of unassigned binary neighbors that conflict with
    /// `var = value`. Returns `false` on a wipeout.
    fn forward_check(&mut self, var: usize, value: i64) -> bool {
        let network = self.network;
        let constraints = self.constraints;

        for &a in &network.arcs_toward[var] {
            let arc = network.arcs[a];
            if self.assignment[arc.var].is_some() {
                continue;
            }
            let domain = &mut self.domains[arc.var];
            for position in (0..domain.len()).rev() {
                let candidate = domain.values()[position];
                if !network.supports(constraints, arc, candidate, value) {
                    domain.remove_at(position);
                    self.trail.push(Removal {
                        var: arc.var,
                        value: candidate,
                        position,
                    });
                }
            }
            if domain.is_empty() {
                return false;
            }
        }
        true
    }

    fn undo(&mut self, checkpoint: usize) {
        for removal in self.trail.backtrack_to(checkpoint) {
            self.domains[removal.var].restore_at(removal.position, removal.value);
        }
    }

    /// Every variable is assigned. Returns `true` to stop the search.
    fn record_leaf(&mut self) -> bool {
        if !self.network.all_hold(self.constraints, &self.assignment) {
            return false;
        }
        let Some(values) = self.assignment.iter().copied().collect::<Option<Vec<i64>>>() else {
            return false;
        };

        let Some((obj, direction)) = self.objective else {
            self.ctx.best = Some(values);
            return true;
        };

        let value = values[obj];
        if self
            .ctx
            .best_value
            .is_none_or(|best| direction.improves(value, best))
        {
            trace!("new incumbent {value} after {} nodes", self.ctx.nodes);
            self.ctx.best_value = Some(value);
            self.ctx.best = Some(values);
        }
        false
    }
}
