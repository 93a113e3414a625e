//! Arithmetic-only expression parser.
//!
//! Player submissions and externally produced hint text are read through this
//! module and never through a general purpose evaluator.

pub mod constants;
mod errors;
mod grammar;
mod lexer;

pub use errors::{EvaluationError, ParseError};
pub use grammar::ExpressionParser;

use crate::expression::{Expression, OperatorSet};

/// Parse `text`, accepting only the operators in `operators`
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not a well formed expression over
/// the enabled operators.
pub fn parse_expression(text: &str, operators: OperatorSet) -> Result<Expression, ParseError> {
    ExpressionParser::new(text, operators)?.parse()
}

/// Parse and evaluate `text` with every operator enabled
///
/// # Errors
///
/// Returns an error if the text cannot be parsed or its value cannot be
/// computed (division by zero, non-finite result, ...).
pub fn evaluate(text: &str) -> Result<f64, EvaluationError> {
    evaluate_with(text, OperatorSet::all())
}

/// Parse and evaluate `text`, accepting only the operators in `operators`
///
/// # Errors
///
/// Same as [`evaluate`], plus [`ParseError::UnsupportedOperator`] for
/// operators outside `operators`.
pub fn evaluate_with(text: &str, operators: OperatorSet) -> Result<f64, EvaluationError> {
    let expr = parse_expression(text, operators)?;
    Ok(expr.evaluate()?)
}
