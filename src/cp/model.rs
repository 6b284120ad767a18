//! Constraint catalog and problem definition.

use super::enumerate::Enumerator;
use super::propagation::{ArcConsistency, Propagation};
use super::solver::{BranchAndBound, CpSolver, Solution, SolverConfig};
use super::variables::{Domain, Variable};
use crate::error::{CspError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A full or partial variable-name to value map.
pub type Assignment = BTreeMap<String, i64>;

/// Free-form constraint parameters, keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

/// The fixed constraint vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConstraintType {
    /// `PRECEDENCE`: strictly increasing values in list order.
    Precedence,
    /// `MUTUAL_EXCLUSION`: pairwise distinct values.
    MutualExclusion,
    /// `CUMULATIVE`: start times sharing a capacity-limited resource.
    Cumulative,
    /// `ALLDIFFERENT`: pairwise distinct values.
    AllDifferent,
    /// `SEQUENCE`: consecutive slots a fixed step apart.
    Sequence,
}

impl ConstraintType {
    /// Canonical upper-case tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintType::Precedence => "PRECEDENCE",
            ConstraintType::MutualExclusion => "MUTUAL_EXCLUSION",
            ConstraintType::Cumulative => "CUMULATIVE",
            ConstraintType::AllDifferent => "ALLDIFFERENT",
            ConstraintType::Sequence => "SEQUENCE",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintType {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PRECEDENCE" => Ok(ConstraintType::Precedence),
            "MUTUAL_EXCLUSION" => Ok(ConstraintType::MutualExclusion),
            "CUMULATIVE" => Ok(ConstraintType::Cumulative),
            "ALLDIFFERENT" | "ALL_DIFFERENT" => Ok(ConstraintType::AllDifferent),
            "SEQUENCE" => Ok(ConstraintType::Sequence),
            _ => Err(CspError::UnknownConstraintType(s.to_string())),
        }
    }
}

/// A single untyped parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Free text.
    Text(String),
    /// Per-task integer list.
    IntList(Vec<i64>),
}

impl ParamValue {
    /// Integer view. Floats are accepted when they hold a whole number.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Integer list view.
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            ParamValue::IntList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(v: Vec<i64>) -> Self {
        ParamValue::IntList(v)
    }
}

/// Typed payload of a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    /// Participants take strictly increasing values in list order.
    Precedence,

    /// Assigned participants take pairwise distinct values.
    MutualExclusion,

    /// Same check as `MutualExclusion`; kept apart so callers can tell an
    /// equipment conflict from an assignment permutation.
    AllDifferent,

    /// Participants are task start times sharing one resource.
    ///
    /// Every task must fit in `[0, horizon)` and the demand of the tasks
    /// running at any instant must stay within `capacity`. `durations` and
    /// `demands` are parallel to the participant list; missing entries
    /// count as 1.
    Cumulative {
        /// Maximum total demand at any instant.
        capacity: i64,
        /// Exclusive upper bound on task end times.
        horizon: i64,
        /// Per-task running time.
        durations: Vec<i64>,
        /// Per-task resource usage while running.
        demands: Vec<i64>,
    },

    /// Participants occupy consecutive slots `step` apart, in list order.
    Sequence {
        /// Distance between neighbouring slots.
        step: i64,
    },
}

/// A typed constraint over an ordered list of variable names.
///
/// Participants missing from an assignment are treated as not yet decided,
/// so a constraint is only violated by values actually present.
///
/// # Examples
///
/// ```
/// use u_csp::cp::{Assignment, Constraint};
///
/// let c = Constraint::precedence("dig", "haul");
/// let mut a = Assignment::new();
/// a.insert("dig".into(), 3);
/// assert!(c.is_satisfied(&a)); // "haul" still open
/// a.insert("haul".into(), 2);
/// assert!(!c.is_satisfied(&a));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    kind: ConstraintKind,
    variables: Vec<String>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, variables: Vec<String>) -> Self {
        Self { kind, variables }
    }

    /// `before < after`.
    pub fn precedence(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self::new(ConstraintKind::Precedence, vec![before.into(), after.into()])
    }

    /// Pairwise distinct values over `variables`.
    pub fn mutual_exclusion(variables: Vec<String>) -> Self {
        Self::new(ConstraintKind::MutualExclusion, variables)
    }

    pub fn all_different(variables: Vec<String>) -> Self {
        Self::new(ConstraintKind::AllDifferent, variables)
    }

    /// Cumulative constraint with unit durations and demands.
    pub fn cumulative(tasks: Vec<String>, capacity: i64, horizon: i64) -> Self {
        let n = tasks.len();
        Self::new(
            ConstraintKind::Cumulative {
                capacity,
                horizon,
                durations: vec![1; n],
                demands: vec![1; n],
            },
            tasks,
        )
    }

    /// Consecutive slots `step` apart, in list order.
    pub fn sequence(variables: Vec<String>, step: i64) -> Self {
        Self::new(ConstraintKind::Sequence { step }, variables)
    }

    /// Builds a typed constraint from a type tag and free-form parameters.
    ///
    /// | Type | Parameters |
    /// |------|------------|
    /// | `CUMULATIVE` | `capacity`, `horizon` (required); `durations`, `demands` (optional lists) |
    /// | `SEQUENCE` | `step` (optional, default 1) |
    /// | others | none; extra keys are ignored |
    pub fn from_params(
        constraint_type: ConstraintType,
        variables: Vec<String>,
        params: &Params,
    ) -> Result<Self> {
        let kind = match constraint_type {
            ConstraintType::Precedence => ConstraintKind::Precedence,
            ConstraintType::MutualExclusion => ConstraintKind::MutualExclusion,
            ConstraintType::AllDifferent => ConstraintKind::AllDifferent,
            ConstraintType::Cumulative => {
                let n = variables.len();
                ConstraintKind::Cumulative {
                    capacity: required_int(constraint_type, params, "capacity")?,
                    horizon: required_int(constraint_type, params, "horizon")?,
                    durations: per_task_list(constraint_type, params, "durations", n)?,
                    demands: per_task_list(constraint_type, params, "demands", n)?,
                }
            }
            ConstraintType::Sequence => {
                let step = match params.get("step") {
                    None => 1,
                    Some(p) => p
                        .as_int()
                        .ok_or_else(|| invalid(constraint_type, "step", "expected an integer"))?,
                };
                ConstraintKind::Sequence { step }
            }
        };
        Ok(Self::new(kind, variables))
    }

    pub fn constraint_type(&self) -> ConstraintType {
        match self.kind {
            ConstraintKind::Precedence => ConstraintType::Precedence,
            ConstraintKind::MutualExclusion => ConstraintType::MutualExclusion,
            ConstraintKind::AllDifferent => ConstraintType::AllDifferent,
            ConstraintKind::Cumulative { .. } => ConstraintType::Cumulative,
            ConstraintKind::Sequence { .. } => ConstraintType::Sequence,
        }
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Participant names, in order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Whether `assignment` violates nothing. Absent names count as open.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.check(|i| assignment.get(&self.variables[i]).copied())
    }

    /// Core satisfaction check over participant positions.
    ///
    /// `value_at(i)` yields the value of the `i`-th participant, or `None`
    /// while it is unassigned.
    pub(crate) fn check(&self, value_at: impl Fn(usize) -> Option<i64>) -> bool {
        let n = self.variables.len();
        match &self.kind {
            ConstraintKind::Precedence => {
                let mut last: Option<i64> = None;
                for v in (0..n).filter_map(&value_at) {
                    if last.is_some_and(|prev| prev >= v) {
                        return false;
                    }
                    last = Some(v);
                }
                true
            }
            ConstraintKind::MutualExclusion | ConstraintKind::AllDifferent => {
                let mut seen: Vec<i64> = Vec::with_capacity(n);
                for v in (0..n).filter_map(&value_at) {
                    if seen.contains(&v) {
                        return false;
                    }
                    seen.push(v);
                }
                true
            }
            ConstraintKind::Cumulative {
                capacity,
                horizon,
                durations,
                demands,
            } => {
                // (time, delta) events; ends sort before starts at equal times
                let mut events: Vec<(i128, i128)> = Vec::with_capacity(2 * n);
                for i in 0..n {
                    let Some(start) = value_at(i) else {
                        continue;
                    };
                    let duration = durations.get(i).copied().unwrap_or(1);
                    let demand = demands.get(i).copied().unwrap_or(1);
                    // widened so extreme starts cannot wrap past the horizon
                    let end = i128::from(start) + i128::from(duration);
                    if start < 0 || end > i128::from(*horizon) {
                        return false;
                    }
                    if duration > 0 {
                        events.push((i128::from(start), i128::from(demand)));
                        events.push((end, -i128::from(demand)));
                    }
                }
                events.sort_unstable();
                let mut load: i128 = 0;
                for (_, delta) in events {
                    load += delta;
                    if load > i128::from(*capacity) {
                        return false;
                    }
                }
                true
            }
            ConstraintKind::Sequence { step } => {
                let mut last: Option<(usize, i64)> = None;
                for i in 0..n {
                    let Some(v) = value_at(i) else {
                        continue;
                    };
                    if let Some((j, w)) = last {
                        let gap = i128::from(v) - i128::from(w);
                        if gap != (i - j) as i128 * i128::from(*step) {
                            return false;
                        }
                    }
                    last = Some((i, v));
                }
                true
            }
        }
    }
}

fn invalid(constraint_type: ConstraintType, name: &str, reason: &str) -> CspError {
    CspError::InvalidParameter {
        constraint: constraint_type.as_str(),
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn required_int(constraint_type: ConstraintType, params: &Params, name: &str) -> Result<i64> {
    params
        .get(name)
        .ok_or_else(|| invalid(constraint_type, name, "missing"))?
        .as_int()
        .ok_or_else(|| invalid(constraint_type, name, "expected an integer"))
}

fn per_task_list(
    constraint_type: ConstraintType,
    params: &Params,
    name: &str,
    n: usize,
) -> Result<Vec<i64>> {
    let Some(param) = params.get(name) else {
        return Ok(vec![1; n]);
    };
    let list = param
        .as_int_list()
        .ok_or_else(|| invalid(constraint_type, name, "expected an integer list"))?;
    if list.len() != n {
        return Err(invalid(
            constraint_type,
            name,
            &format!("expected {n} entries, got {}", list.len()),
        ));
    }
    if list.iter().any(|&x| x < 0) {
        return Err(invalid(constraint_type, name, "entries must be non-negative"));
    }
    Ok(list.to_vec())
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Min,
    Max,
}

impl Direction {
    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn improves(self, candidate: i64, incumbent: i64) -> bool {
        match self {
            Direction::Min => candidate < incumbent,
            Direction::Max => candidate > incumbent,
        }
    }
}

impl FromStr for Direction {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(Direction::Min),
            "max" | "maximize" => Ok(Direction::Max),
            _ => Err(CspError::UnknownDirection(s.to_string())),
        }
    }
}

/// Optimize the value of a single variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Name of the optimized variable.
    pub variable: String,
    /// Whether smaller or larger is better.
    pub direction: Direction,
}

/// A constraint satisfaction problem.
///
/// Contains variables, constraints, and an optional objective. Solving
/// tightens variable domains in place and never restores them; clone the
/// problem first to solve variants of the same base.
///
/// # Examples
///
/// ```
/// use u_csp::cp::{Direction, Problem};
///
/// let mut p = Problem::new();
/// for name in ["t1", "t2", "t3"] {
///     p.add_variable(name, 1..=5).unwrap();
/// }
/// p.post(u_csp::cp::Constraint::precedence("t1", "t2"));
/// p.post(u_csp::cp::Constraint::precedence("t2", "t3"));
/// p.set_objective("t3", Direction::Min);
///
/// let solution = p.solve_within(5.0).unwrap().expect("feasible");
/// assert_eq!(solution.objective_value, Some(3));
/// assert!(solution.is_optimal);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl Problem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable. Names must be unique.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: impl Into<Domain>) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(CspError::DuplicateVariable(name));
        }
        self.index.insert(name.clone(), self.variables.len());
        self.variables.push(Variable::new(name, domain));
        Ok(())
    }

    /// Adds a constraint from a type tag and free-form parameters.
    ///
    /// Participant names are not checked; see [`Problem::validate`].
    pub fn add_constraint(
        &mut self,
        constraint_type: ConstraintType,
        variables: Vec<String>,
        params: Params,
    ) -> Result<()> {
        let constraint = Constraint::from_params(constraint_type, variables, &params)?;
        self.constraints.push(constraint);
        Ok(())
    }

    /// Adds an already-typed constraint.
    pub fn post(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn post_all(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(constraints);
    }

    /// Sets the objective. The variable is not checked.
    pub fn set_objective(&mut self, variable: impl Into<String>, direction: Direction) {
        self.objective = Some(Objective {
            variable: variable.into(),
            direction,
        });
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Fixes a registered variable to a value of its current domain.
    pub fn assign(&mut self, name: &str, value: i64) -> Result<()> {
        self.variable_mut(name)?.assign(value)
    }

    pub fn unassign(&mut self, name: &str) -> Result<()> {
        self.variable_mut(name)?.unassign();
        Ok(())
    }

    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Variable> {
        let i = *self
            .index
            .get(name)
            .ok_or_else(|| CspError::UnknownVariable(name.to_string()))?;
        Ok(&mut self.variables[i])
    }

    /// Current domain of a variable.
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.variable(name).map(|v| &v.domain)
    }

    /// Variables in registration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn split_mut(&mut self) -> (&mut [Variable], &[Constraint]) {
        (&mut self.variables, &self.constraints)
    }

    /// Checks that every constraint participant and the objective variable
    /// are registered.
    pub fn validate(&self) -> Result<()> {
        let names = self
            .constraints
            .iter()
            .flat_map(|c| c.variables.iter())
            .chain(self.objective.iter().map(|o| &o.variable));
        for name in names {
            if !self.index.contains_key(name) {
                return Err(CspError::UnknownVariable(name.clone()));
            }
        }
        Ok(())
    }

    /// Whether `assignment` violates no constraint.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Runs arc consistency to a fixpoint.
    pub fn propagate(&mut self) -> Propagation {
        ArcConsistency::propagate(self)
    }

    /// Branch-and-bound search. `Ok(None)` means no solution was found.
    pub fn solve(&mut self, config: &SolverConfig) -> Result<Option<Solution>> {
        BranchAndBound::new().solve(self, config)
    }

    /// [`Problem::solve`] with a wall-clock budget in seconds.
    pub fn solve_within(&mut self, time_limit_secs: f64) -> Result<Option<Solution>> {
        self.solve(&SolverConfig::default().with_time_limit_secs(time_limit_secs))
    }

    /// Collects up to `max_solutions` distinct full solutions.
    pub fn enumerate_solutions(&self, max_solutions: usize) -> Vec<Assignment> {
        Enumerator::enumerate(self, max_solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn assignment(pairs: &[(&str, i64)]) -> Assignment {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_duplicate_variable() {
        let mut p = Problem::new();
        p.add_variable("x", [1, 2]).unwrap();
        assert_eq!(
            p.add_variable("x", [3]),
            Err(CspError::DuplicateVariable("x".into()))
        );
        assert_eq!(p.variable_count(), 1);
    }

    #[test]
    fn test_precedence_semantics() {
        let c = Constraint::precedence("a", "b");
        assert!(c.is_satisfied(&assignment(&[("a", 1), ("b", 2)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 2), ("b", 2)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 3), ("b", 2)])));
        assert!(c.is_satisfied(&assignment(&[("a", 3)])));
    }

    #[test]
    fn test_precedence_chain_skips_open_positions() {
        let c = Constraint::new(ConstraintKind::Precedence, names(&["a", "b", "c"]));
        assert!(c.is_satisfied(&assignment(&[("a", 1), ("c", 5)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 5), ("c", 1)])));
    }

    #[test]
    fn test_all_different_semantics() {
        let c = Constraint::all_different(names(&["a", "b", "c"]));
        assert!(c.is_satisfied(&assignment(&[("a", 1), ("b", 2), ("c", 3)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 1), ("c", 1)])));
        assert!(c.is_satisfied(&Assignment::new()));

        let m = Constraint::mutual_exclusion(names(&["a", "b"]));
        assert!(!m.is_satisfied(&assignment(&[("a", 4), ("b", 4)])));
    }

    #[test]
    fn test_cumulative_capacity() {
        let c = Constraint::cumulative(names(&["a", "b", "c"]), 2, 10);
        assert!(c.is_satisfied(&assignment(&[("a", 0), ("b", 0), ("c", 1)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 0), ("b", 0), ("c", 0)])));
    }

    #[test]
    fn test_cumulative_horizon() {
        let c = Constraint::cumulative(names(&["a"]), 1, 5);
        assert!(c.is_satisfied(&assignment(&[("a", 4)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 5)])));
        assert!(!c.is_satisfied(&assignment(&[("a", -1)])));
    }

    #[test]
    fn test_cumulative_durations_and_demands() {
        let mut params = Params::new();
        params.insert("capacity".into(), ParamValue::Int(3));
        params.insert("horizon".into(), ParamValue::Int(10));
        params.insert("durations".into(), ParamValue::IntList(vec![3, 2]));
        params.insert("demands".into(), ParamValue::IntList(vec![2, 2]));
        let c = Constraint::from_params(ConstraintType::Cumulative, names(&["a", "b"]), &params)
            .unwrap();

        // a runs [0,3), b runs [3,5): back to back is fine
        assert!(c.is_satisfied(&assignment(&[("a", 0), ("b", 3)])));
        // overlap at t=2 needs 4 > 3
        assert!(!c.is_satisfied(&assignment(&[("a", 0), ("b", 2)])));
        // b would end at 11
        assert!(!c.is_satisfied(&assignment(&[("a", 0), ("b", 9)])));
    }

    #[test]
    fn test_cumulative_missing_capacity() {
        let mut params = Params::new();
        params.insert("horizon".into(), ParamValue::Int(10));
        let err = Constraint::from_params(ConstraintType::Cumulative, names(&["a"]), &params)
            .unwrap_err();
        assert!(matches!(err, CspError::InvalidParameter { ref name, .. } if name == "capacity"));
    }

    #[test]
    fn test_cumulative_bad_list_length() {
        let mut params = Params::new();
        params.insert("capacity".into(), ParamValue::Int(1));
        params.insert("horizon".into(), ParamValue::Int(10));
        params.insert("durations".into(), ParamValue::IntList(vec![1]));
        assert!(
            Constraint::from_params(ConstraintType::Cumulative, names(&["a", "b"]), &params)
                .is_err()
        );
    }

    #[test]
    fn test_float_params_accepted_when_whole() {
        let mut params = Params::new();
        params.insert("capacity".into(), ParamValue::Float(2.0));
        params.insert("horizon".into(), ParamValue::Int(8));
        assert!(Constraint::from_params(ConstraintType::Cumulative, names(&["a"]), &params).is_ok());

        params.insert("capacity".into(), ParamValue::Float(2.5));
        assert!(Constraint::from_params(ConstraintType::Cumulative, names(&["a"]), &params).is_err());
    }

    #[test]
    fn test_sequence_semantics() {
        let c = Constraint::sequence(names(&["a", "b", "c"]), 1);
        assert!(c.is_satisfied(&assignment(&[("a", 4), ("b", 5), ("c", 6)])));
        assert!(c.is_satisfied(&assignment(&[("a", 4), ("c", 6)])));
        assert!(!c.is_satisfied(&assignment(&[("a", 4), ("c", 7)])));

        let stepped = Constraint::sequence(names(&["a", "b"]), 3);
        assert!(stepped.is_satisfied(&assignment(&[("a", 1), ("b", 4)])));
    }

    #[test]
    fn test_sequence_extreme_values() {
        let c = Constraint::sequence(names(&["a", "b"]), 1);
        assert!(!c.is_satisfied(&assignment(&[("a", -1), ("b", i64::MAX)])));
        assert!(!c.is_satisfied(&assignment(&[("a", i64::MAX), ("b", i64::MIN)])));
        assert!(c.is_satisfied(&assignment(&[("a", i64::MIN), ("b", i64::MIN + 1)])));

        let wide = Constraint::sequence(names(&["a", "b", "c"]), i64::MAX);
        assert!(!wide.is_satisfied(&assignment(&[("a", 0), ("c", i64::MAX)])));
    }

    #[test]
    fn test_cumulative_extreme_values() {
        let c = Constraint::cumulative(names(&["a"]), 1, 10);
        assert!(!c.is_satisfied(&assignment(&[("a", i64::MAX)])));

        let heavy = Constraint::new(
            ConstraintKind::Cumulative {
                capacity: i64::MAX,
                horizon: i64::MAX,
                durations: vec![1, 1],
                demands: vec![i64::MAX, i64::MAX],
            },
            names(&["a", "b"]),
        );
        assert!(heavy.is_satisfied(&assignment(&[("a", 0), ("b", 1)])));
        assert!(!heavy.is_satisfied(&assignment(&[("a", 0), ("b", 0)])));
    }

    #[test]
    fn test_extreme_domains_solve_without_panicking() {
        let mut p = Problem::new();
        p.add_variable("a", [-1]).unwrap();
        p.add_variable("b", [i64::MAX]).unwrap();
        p.post(Constraint::sequence(names(&["a", "b"]), 1));
        assert!(p.solve(&SolverConfig::default()).unwrap().is_none());

        let mut p = Problem::new();
        p.add_variable("a", [i64::MAX]).unwrap();
        p.post(Constraint::cumulative(names(&["a"]), 1, 10));
        assert!(p.solve(&SolverConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_unknown_participant_is_vacuous() {
        let mut p = Problem::new();
        p.add_variable("a", [1]).unwrap();
        p.post(Constraint::precedence("a", "ghost"));
        assert!(p.is_satisfied(&assignment(&[("a", 1)])));
        assert_eq!(p.validate(), Err(CspError::UnknownVariable("ghost".into())));
    }

    #[test]
    fn test_validate_objective_reference() {
        let mut p = Problem::new();
        p.add_variable("a", [1]).unwrap();
        p.set_objective("cost", Direction::Min);
        assert_eq!(p.validate(), Err(CspError::UnknownVariable("cost".into())));
    }

    #[test]
    fn test_problem_assign() {
        let mut p = Problem::new();
        p.add_variable("a", [1, 2]).unwrap();
        assert!(p.assign("a", 2).is_ok());
        assert!(p.assign("a", 3).is_err());
        assert_eq!(p.assign("b", 1), Err(CspError::UnknownVariable("b".into())));
        p.unassign("a").unwrap();
        assert!(!p.variable("a").unwrap().is_assigned());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            "mutual_exclusion".parse::<ConstraintType>().unwrap(),
            ConstraintType::MutualExclusion
        );
        assert_eq!("ALLDIFFERENT".parse::<ConstraintType>().unwrap(), ConstraintType::AllDifferent);
        assert!("NO_OVERLAP".parse::<ConstraintType>().is_err());
        assert_eq!("max".parse::<Direction>().unwrap(), Direction::Max);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_add_constraint_roundtrips_type() {
        let mut p = Problem::new();
        p.add_constraint(ConstraintType::Sequence, names(&["a", "b"]), Params::new())
            .unwrap();
        assert_eq!(p.constraints()[0].constraint_type(), ConstraintType::Sequence);
        assert_eq!(p.constraints()[0].kind(), &ConstraintKind::Sequence { step: 1 });
    }

    #[test]
    fn test_direction_improves() {
        assert!(Direction::Min.improves(2, 3));
        assert!(!Direction::Min.improves(3, 3));
        assert!(Direction::Max.improves(4, 3));
        assert!(!Direction::Max.improves(3, 3));
    }
}
