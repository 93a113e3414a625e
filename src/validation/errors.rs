use thiserror::Error;

use crate::expression::ExpressionError;
use crate::parser::ParseError;

/// Why a player's expression was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Invalid expression: {0}")]
    Syntax(#[from] ParseError),
    #[error("Expression cannot be evaluated: {0}")]
    Evaluation(#[from] ExpressionError),
    #[error("{0} is not one of the available numbers")]
    UnknownOperand(i64),
    #[error("{0} is used more times than it is available")]
    OperandReused(i64),
    #[error("Every number must be used ({used} of {available} used)")]
    NotAllOperandsUsed { used: usize, available: usize },
}

/// Failures of an external hint source; always recovered by falling back to
/// the solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExternalError {
    #[error("Hint service unavailable: {0}")]
    Unavailable(String),
    #[error("Response has no {0} block")]
    MissingBlock(&'static str),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("No candidate in the response is a valid solution")]
    NoValidCandidates,
}
