//! Error types for route compilation and matching.
//!
//! Every failure is structural and surfaces synchronously: a bad argument,
//! a malformed pattern, indistinguishable routes, an automaton too large for
//! 32-bit tables, or compiled data that fails shape validation.

use thiserror::Error;

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Router error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong argument type at a dynamic boundary.
    #[error("invalid input: {0}")]
    Input(String),

    /// Malformed route pattern.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Two or more routes accept the same input.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The automaton does not fit in 32-bit tables.
    #[error("too many routes: {states} states and {routes} routes exceed the 32-bit table limit")]
    Capacity { states: usize, routes: usize },

    /// Compiled data failed validation while being reconstructed.
    #[error("malformed compiled router: {0}")]
    Shape(String),
}

/// A route pattern that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset} in \"{source_pattern}\"")]
pub struct SyntaxError {
    pub message: String,
    pub source_pattern: String,
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self {
            message: message.into(),
            source_pattern: source.to_string(),
            offset,
        }
    }
}

/// Routes that became indistinguishable in the compiled automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("route conflicts detected: {}", conflicts.join(", "))]
pub struct ConflictError {
    /// Source patterns of every conflicting route, in registration order.
    pub conflicts: Vec<String>,
}
