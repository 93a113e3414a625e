use thiserror::Error;

use crate::expression::operator::Operator;

/// Errors that can occur while evaluating an expression tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Complex result from negative base with fractional exponent")]
    ComplexResult,
    #[error("Square root of negative number {0}")]
    NegativeSquareRoot(f64),
    #[error("Factorial is only defined for integers in 0..={max}, got {value}")]
    InvalidFactorial { value: f64, max: u32 },
    #[error("Result is not a finite number")]
    NonFinite,
    #[error("Operator '{0}' cannot be applied here")]
    MisusedOperator(Operator),
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}
