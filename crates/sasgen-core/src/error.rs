//! Errors raised while reading or validating a task.

use crate::Fact;

/// Task reading or validation failure.
///
/// Line numbers are 1-based and refer to the `.sas` input.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("line {line}: expected `{expected}`, found `{found}`")]
    Magic {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: expected an integer, found `{found}`")]
    Integer { line: usize, found: String },

    #[error("line {line}: malformed {what} `{found}`")]
    Malformed {
        line: usize,
        what: &'static str,
        found: String,
    },

    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },

    #[error("unsupported task file version {found} (expected {expected})")]
    Version { found: i64, expected: i64 },

    #[error("invalid variable id {var} in {fact}")]
    VariableOutOfBounds { var: usize, fact: Fact },

    #[error("invalid value {value} of variable {var} (domain size {domain_size})")]
    ValueOutOfBounds {
        var: usize,
        value: usize,
        domain_size: usize,
    },

    #[error("variable {var} has an empty domain")]
    EmptyDomain { var: usize },

    #[error("initial state assigns {found} values for {expected} variables")]
    InitialState { found: usize, expected: usize },

    #[error("task has no goal facts")]
    NoGoal,

    #[error("JSON task error: {0}")]
    Json(#[from] serde_json::Error),
}
