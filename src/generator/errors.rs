use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("A puzzle needs at least one operand")]
    NoOperands,
    #[error("Too many operands: {count} (max {max})")]
    TooManyOperands { count: usize, max: usize },
    #[error("Cannot draw {requested} distinct operands from 0..={max_digit_value}")]
    NotEnoughDigits {
        requested: usize,
        max_digit_value: i64,
    },
    #[error("Target range {min}..={max} is empty")]
    EmptyRange { min: i64, max: i64 },
    #[error("No binary operator enabled for a {0}-operand puzzle")]
    NoBinaryOperator(usize),
    #[error("No acceptable puzzle found after {attempts} attempts")]
    Exhausted { attempts: usize },
}
