use thiserror::Error;

/// Errors that can occur in utility functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Digit string cannot be empty")]
    EmptyDigitString,
    #[error("Digit string must contain only digits: {0}")]
    InvalidDigitString(String),
    #[error("At least one operand is required")]
    NoOperands,
    #[error("Too many operands: {count} given, at most {max} supported")]
    TooManyOperands { count: usize, max: usize },
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    #[error("Target must be a finite number, got {0}")]
    NonFiniteTarget(f64),
    #[error("Cannot concatenate {0:?}: {1}")]
    InvalidConcatenation(Vec<i64>, &'static str),
}
