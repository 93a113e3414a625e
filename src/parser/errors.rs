use thiserror::Error;

use crate::expression::{ExpressionError, Operator};

/// Syntax errors reported while reading expression text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },
    #[error("Expression ends unexpectedly")]
    UnexpectedEnd,
    #[error("Parenthesis opened at position {position} is never closed")]
    UnclosedParenthesis { position: usize },
    #[error("Closing parenthesis at position {position} has no matching '('")]
    UnmatchedParenthesis { position: usize },
    #[error("Unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },
    #[error("Number {0} is too large")]
    LiteralOverflow(String),
    #[error("Expression is too long (more than {limit} tokens)")]
    TooLong { limit: usize },
    #[error("Expression nests deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },
    #[error("Operator '{0}' is not allowed in this puzzle")]
    UnsupportedOperator(Operator),
}

/// Failure to turn expression text into a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Invalid expression: {0}")]
    Syntax(#[from] ParseError),
    #[error("Cannot evaluate expression: {0}")]
    Expression(#[from] ExpressionError),
}
