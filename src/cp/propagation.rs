//! AC-3 arc consistency.
//!
//! Every binary constraint contributes two directed arcs. Revising an arc
//! `(X, Y)` drops each value of X that no value of Y supports; when X
//! shrinks, the arcs pointing at X are queued again. Constraints over more
//! than two variables are left to search-time checking.
//!
//! # References
//!
//! Mackworth (1977), "Consistency in Networks of Relations"

use super::model::{Constraint, Problem};
use super::network::{DirectedArc, Network};
use super::variables::Variable;
use log::debug;
use std::collections::VecDeque;

/// Result of a propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Propagation {
    /// Fixpoint reached; every domain is non-empty.
    Consistent {
        /// Values removed across all domains.
        removed: usize,
        /// Arc revisions performed.
        revisions: usize,
    },
    /// The named variable lost its last value. The problem is infeasible.
    Wipeout { variable: String },
}

impl Propagation {
    pub fn is_consistent(&self) -> bool {
        matches!(self, Propagation::Consistent { .. })
    }
}

/// The AC-3 propagator.
pub struct ArcConsistency;

impl ArcConsistency {
    /// Tightens the problem's domains to arc consistency.
    ///
    /// Domains only ever shrink, and a second run on the result removes
    /// nothing. Assigned values are not consulted: propagation works on
    /// domains alone.
    pub fn propagate(problem: &mut Problem) -> Propagation {
        let network = Network::build(problem);
        let (variables, constraints) = problem.split_mut();

        if let Some(empty) = variables.iter().find(|v| v.domain.is_empty()) {
            debug!("propagation: '{}' starts with an empty domain", empty.name);
            return Propagation::Wipeout {
                variable: empty.name.clone(),
            };
        }

        let mut queue: VecDeque<usize> = (0..network.arcs.len()).collect();
        let mut queued = vec![true; network.arcs.len()];
        let mut removed = 0usize;
        let mut revisions = 0usize;

        while let Some(a) = queue.pop_front() {
            queued[a] = false;
            revisions += 1;

            let arc = network.arcs[a];
            let dropped = revise(variables, constraints, &network, arc);
            if dropped == 0 {
                continue;
            }
            removed += dropped;

            if variables[arc.var].domain.is_empty() {
                debug!(
                    "propagation: domain of '{}' wiped out after {revisions} revisions",
                    variables[arc.var].name
                );
                return Propagation::Wipeout {
                    variable: variables[arc.var].name.clone(),
                };
            }

            for &b in &network.arcs_toward[arc.var] {
                let next = network.arcs[b];
                if next.var == arc.other && next.constraint == arc.constraint {
                    continue;
                }
                if !queued[b] {
                    queued[b] = true;
                    queue.push_back(b);
                }
            }
        }

        debug!("propagation: fixpoint after {revisions} revisions, {removed} values removed");
        Propagation::Consistent { removed, revisions }
    }
}

/// Removes unsupported values of `arc.var`. Returns how many were removed.
fn revise(
    variables: &mut [Variable],
    constraints: &[Constraint],
    network: &Network,
    arc: DirectedArc,
) -> usize {
    let support = variables[arc.other].domain.clone();
    variables[arc.var]
        .domain
        .retain(|v| support.iter().any(|w| network.supports(constraints, arc, v, w)))
}
