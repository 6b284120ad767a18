//! Bounded enumeration of satisfying assignments.

use super::model::{Assignment, Constraint, Problem};
use super::network::Network;
use super::variables::{Domain, Variable};
use log::debug;

/// Depth-first collection of full solutions.
///
/// Branches on the variable with the smallest domain and tries every value
/// in domain order. Domains are used as they stand: no propagation is run,
/// so call [`Problem::propagate`] first to prune the tree.
pub struct Enumerator;

impl Enumerator {
    /// Returns up to `max_solutions` distinct solutions.
    pub fn enumerate(problem: &Problem, max_solutions: usize) -> Vec<Assignment> {
        if max_solutions == 0 {
            return Vec::new();
        }

        let network = Network::build(problem);
        let mut walk = Walk {
            network: &network,
            constraints: problem.constraints(),
            domains: problem
                .variables()
                .iter()
                .map(Variable::effective_domain)
                .collect(),
            assignment: vec![None; problem.variable_count()],
            found: Vec::new(),
            limit: max_solutions,
        };
        walk.descend();

        debug!(
            "enumeration: {} solutions (limit {max_solutions})",
            walk.found.len()
        );

        let found = walk.found;
        found
            .into_iter()
            .map(|values| {
                problem
                    .variables()
                    .iter()
                    .zip(values)
                    .map(|(var, value)| (var.name.clone(), value))
                    .collect()
            })
            .collect()
    }
}

struct Walk<'a> {
    network: &'a Network,
    constraints: &'a [Constraint],
    domains: Vec<Domain>,
    assignment: Vec<Option<i64>>,
    found: Vec<Vec<i64>>,
    limit: usize,
}

impl Walk<'_> {
    /// Returns `true` once the limit is reached.
    fn descend(&mut self) -> bool {
        let next = (0..self.assignment.len())
            .filter(|&v| self.assignment[v].is_none())
            .min_by_key(|&v| self.domains[v].len());

        let Some(var) = next else {
            if self.network.all_hold(self.constraints, &self.assignment) {
                if let Some(values) = self.assignment.iter().copied().collect::<Option<Vec<i64>>>() {
                    self.found.push(values);
                }
            }
            return self.found.len() >= self.limit;
        };

        for position in 0..self.domains[var].len() {
            let value = self.domains[var].values()[position];
            self.assignment[var] = Some(value);
            if self.network.consistent(self.constraints, var, &self.assignment) && self.descend() {
                self.assignment[var] = None;
                return true;
            }
        }
        self.assignment[var] = None;
        false
    }
}
