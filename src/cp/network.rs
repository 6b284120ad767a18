//! Index-resolved view of a problem's constraints.
//!
//! Constraints name their participants; propagation and search work on
//! variable indices. Names that are not registered resolve to `None` and
//! behave as permanently unassigned.

use super::model::{Constraint, Problem};

/// Directed arc: revise `var` against `other` through `constraint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DirectedArc {
    pub(crate) var: usize,
    pub(crate) other: usize,
    pub(crate) constraint: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct Network {
    /// Per constraint: variable index of each participant position.
    participants: Vec<Vec<Option<usize>>>,
    /// Per variable: constraints it participates in.
    by_var: Vec<Vec<usize>>,
    pub(crate) arcs: Vec<DirectedArc>,
    /// Per variable `x`: indices of arcs `(z, x, c)`, i.e. arcs that must be
    /// revisited once the domain of `x` shrinks.
    pub(crate) arcs_toward: Vec<Vec<usize>>,
}

impl Network {
    pub(crate) fn build(problem: &Problem) -> Self {
        let n = problem.variable_count();
        let mut participants = Vec::with_capacity(problem.constraint_count());
        let mut by_var = vec![Vec::new(); n];
        let mut arcs = Vec::new();
        let mut arcs_toward = vec![Vec::new(); n];

        for (ci, constraint) in problem.constraints().iter().enumerate() {
            let resolved: Vec<Option<usize>> = constraint
                .variables()
                .iter()
                .map(|name| problem.index_of(name))
                .collect();

            for v in resolved.iter().flatten() {
                if by_var[*v].last() != Some(&ci) {
                    by_var[*v].push(ci);
                }
            }

            // Only genuine binary constraints get arcs
            if let [Some(x), Some(y)] = resolved[..] {
                if x != y {
                    for (var, other) in [(x, y), (y, x)] {
                        arcs_toward[other].push(arcs.len());
                        arcs.push(DirectedArc {
                            var,
                            other,
                            constraint: ci,
                        });
                    }
                }
            }

            participants.push(resolved);
        }

        Self {
            participants,
            by_var,
            arcs,
            arcs_toward,
        }
    }

    /// Whether constraint `ci` is not violated by the partial `assignment`.
    pub(crate) fn holds(
        &self,
        constraints: &[Constraint],
        ci: usize,
        assignment: &[Option<i64>],
    ) -> bool {
        let resolved = &self.participants[ci];
        constraints[ci].check(|i| resolved[i].and_then(|v| assignment[v]))
    }

    /// Whether every constraint touching `var` holds.
    pub(crate) fn consistent(
        &self,
        constraints: &[Constraint],
        var: usize,
        assignment: &[Option<i64>],
    ) -> bool {
        self.by_var[var]
            .iter()
            .all(|&ci| self.holds(constraints, ci, assignment))
    }

    pub(crate) fn all_hold(&self, constraints: &[Constraint], assignment: &[Option<i64>]) -> bool {
        (0..constraints.len()).all(|ci| self.holds(constraints, ci, assignment))
    }

    /// Whether `{arc.var: v, arc.other: w}` satisfies the arc's constraint.
    pub(crate) fn supports(&self, constraints: &[Constraint], arc: DirectedArc, v: i64, w: i64) -> bool {
        let resolved = &self.participants[arc.constraint];
        constraints[arc.constraint].check(|i| match resolved[i] {
            Some(x) if x == arc.var => Some(v),
            Some(x) if x == arc.other => Some(w),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::Constraint;

    fn problem() -> Problem {
        let mut p = Problem::new();
        for name in ["a", "b", "c"] {
            p.add_variable(name, 1..=3).unwrap();
        }
        p.post(Constraint::precedence("a", "b"));
        p.post(Constraint::all_different(vec!["a".into(), "b".into(), "c".into()]));
        p.post(Constraint::precedence("c", "ghost"));
        p
    }

    #[test]
    fn test_arcs_only_for_binary_constraints() {
        let net = Network::build(&problem());
        assert_eq!(net.arcs.len(), 2);
        assert_eq!(net.arcs[0], DirectedArc { var: 0, other: 1, constraint: 0 });
        assert_eq!(net.arcs[1], DirectedArc { var: 1, other: 0, constraint: 0 });
        assert_eq!(net.arcs_toward[1], vec![0]);
        assert_eq!(net.arcs_toward[0], vec![1]);
        assert!(net.arcs_toward[2].is_empty());
    }

    #[test]
    fn test_unknown_participant_never_violates() {
        let p = problem();
        let net = Network::build(&p);
        let assignment = [None, None, Some(3)];
        assert!(net.holds(p.constraints(), 2, &assignment));
    }

    #[test]
    fn test_consistent_checks_touching_constraints() {
        let p = problem();
        let net = Network::build(&p);
        assert!(net.consistent(p.constraints(), 0, &[Some(1), Some(2), None]));
        assert!(!net.consistent(p.constraints(), 0, &[Some(2), Some(2), None]));
        assert!(!net.all_hold(p.constraints(), &[Some(1), Some(2), Some(2)]));
    }

    #[test]
    fn test_supports() {
        let p = problem();
        let net = Network::build(&p);
        let arc = net.arcs[0];
        assert!(net.supports(p.constraints(), arc, 1, 2));
        assert!(!net.supports(p.constraints(), arc, 2, 1));
    }
}
