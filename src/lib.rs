//! Discrete constraint satisfaction and optimization engine.
//!
//! Resolves scheduling sub-problems that need exact discrete decisions:
//!
//! - **Precedence**: mining blocks ordered before one another.
//! - **Mutual exclusion**: shared equipment never used twice at once.
//! - **Cumulative**: resource usage bounded over a time horizon.
//! - **All-different**: permutation-style assignments.
//!
//! Problems are solved by AC-3 arc consistency followed by depth-first
//! branch-and-bound with most-constrained-variable ordering, or enumerated
//! up to a caller-chosen number of solutions.
//!
//! # Architecture
//!
//! The [`cp`] module is the engine. [`mining`] holds thin constructors for
//! mine-scheduling callers. Continuous optimization, persistence, and the
//! request layer live elsewhere.
//!
//! Logging goes through the `log` facade; install any logger to see
//! propagation and search summaries.

pub mod cp;
pub mod error;
pub mod mining;

pub use error::{CspError, Result};
