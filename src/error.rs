//! Error taxonomy.
//!
//! Infeasibility and timeouts are not errors: they surface as `Ok(None)` or
//! as flags on [`Solution`](crate::cp::Solution). Only malformed input ends
//! up here.

/// Errors raised while building or solving a problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CspError {
    /// A variable with this name already exists.
    #[error("variable '{0}' is already registered")]
    DuplicateVariable(String),

    /// A name that is not a registered variable.
    #[error("undefined variable '{0}'")]
    UnknownVariable(String),

    /// Assignment of a value outside the variable's domain.
    #[error("value {value} is not in the domain of '{variable}'")]
    ValueNotInDomain { variable: String, value: i64 },

    /// Constraint type tag outside the fixed vocabulary.
    #[error("unknown constraint type '{0}'")]
    UnknownConstraintType(String),

    /// Objective direction other than min or max.
    #[error("unknown objective direction '{0}', expected \"min\" or \"max\"")]
    UnknownDirection(String),

    /// Missing or malformed constraint parameter.
    #[error("invalid parameter '{name}' for {constraint}: {reason}")]
    InvalidParameter {
        /// Constraint type tag.
        constraint: &'static str,
        /// Parameter key.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Solver settings rejected by `SolverConfig::validate`.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for fallible CSP operations.
pub type Result<T> = std::result::Result<T, CspError>;
