//! Solving many independent problems at once.
//!
//! Problems share no state, so each solve owns its problem exclusively.
//! With the `parallel` feature the batch is spread over rayon's pool.

use super::model::Problem;
use super::solver::{BranchAndBound, CpSolver, Solution, SolverConfig};
use crate::error::Result;

/// Solves every problem with the same configuration. Results are in input
/// order.
pub fn solve_batch(problems: &mut [Problem], config: &SolverConfig) -> Vec<Result<Option<Solution>>> {
    let solver = BranchAndBound::new();

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        problems
            .par_iter_mut()
            .map(|p| solver.solve(p, config))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results = problems.iter_mut().map(|p| solver.solve(p, config)).collect();

    results
}
