//! Constraint Programming (CP) engine.
//!
//! Exact discrete search over named integer variables with finite domains.
//!
//! # Key Components
//!
//! - **Variables**: [`Variable`], [`Domain`]: names with candidate sets
//! - **Constraints**: [`Constraint`]: Precedence, MutualExclusion,
//!   Cumulative, AllDifferent, Sequence
//! - **Problem**: [`Problem`]: container for variables, constraints, objective
//! - **Propagation**: [`ArcConsistency`]: AC-3 over binary constraints
//! - **Search**: [`BranchAndBound`] behind the [`CpSolver`] trait
//! - **Enumeration**: [`Enumerator`]: bounded list of distinct solutions
//!
//! # Design
//!
//! Propagation runs once before search. Search assigns variables in
//! most-constrained-first order and checks constraints incrementally;
//! n-ary constraints are only ever checked, never propagated. Domains of
//! the [`Problem`] are tightened by propagation and not restored.
//!
//! # References
//!
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

mod batch;
mod enumerate;
mod model;
mod network;
mod propagation;
mod solver;
mod trail;
mod variables;

pub use batch::solve_batch;
pub use enumerate::Enumerator;
pub use model::{
    Assignment, Constraint, ConstraintKind, ConstraintType, Direction, Objective, ParamValue,
    Params, Problem,
};
pub use propagation::{ArcConsistency, Propagation};
pub use solver::{BranchAndBound, CpSolver, Solution, SolverConfig};
pub use variables::{Domain, Variable};
