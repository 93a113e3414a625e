use log::debug;

use crate::expression::ast::Expression;
use crate::expression::errors::ExpressionError;
use crate::expression::operator::Operator;

/// Largest argument whose factorial is still a finite `f64`
pub const MAX_FACTORIAL: u32 = 170;

#[inline]
pub(crate) fn is_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

#[inline]
pub(crate) fn is_integer(value: f64) -> bool {
    if value.abs() > 2_f64.powi(52) {
        true
    } else {
        (value - value.round()).abs() < 1e-9
    }
}

#[inline]
fn finite(value: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NonFinite)
    }
}

/// Returns true if `value` is finite and within `tolerance` of `target`
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    value.is_finite() && (value - target).abs() < tolerance
}

/// Apply a binary operator to two already evaluated operands
///
/// # Errors
///
/// Returns an error on division by zero, complex powers, non-finite results,
/// or when `op` is not a binary operator.
pub fn apply_binary(op: Operator, left: f64, right: f64) -> Result<f64, ExpressionError> {
    match op {
        Operator::Add => finite(left + right),
        Operator::Sub => finite(left - right),
        Operator::Mul => finite(left * right),
        Operator::Div => {
            if is_zero(right) {
                Err(ExpressionError::DivisionByZero)
            } else {
                finite(left / right)
            }
        }
        Operator::Pow => {
            if left < 0.0 && !is_integer(right) {
                Err(ExpressionError::ComplexResult)
            } else if is_zero(left) && right < 0.0 {
                Err(ExpressionError::DivisionByZero)
            } else {
                finite(left.powf(right))
            }
        }
        other => Err(ExpressionError::MisusedOperator(other)),
    }
}

/// Apply a unary function (`sqrt`, `cbrt`, `!`) to an evaluated operand
///
/// # Errors
///
/// Returns an error for square roots of negative numbers, factorials outside
/// `0..=170` or of non-integers, and when `op` is not a unary function.
pub fn apply_unary(op: Operator, value: f64) -> Result<f64, ExpressionError> {
    match op {
        Operator::Sqrt => {
            if value < 0.0 {
                Err(ExpressionError::NegativeSquareRoot(value))
            } else {
                finite(value.sqrt())
            }
        }
        Operator::Cbrt => finite(value.cbrt()),
        Operator::Factorial => {
            if value < 0.0 || !is_integer(value) || value > f64::from(MAX_FACTORIAL) {
                return Err(ExpressionError::InvalidFactorial {
                    value,
                    max: MAX_FACTORIAL,
                });
            }
            let n = value.round() as u32;
            finite((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
        }
        other => Err(ExpressionError::MisusedOperator(other)),
    }
}

impl Expression {
    /// # Errors
    ///
    /// Returns an error when attempting:
    /// - Division by zero
    /// - Raising a negative base to a fractional exponent (complex result)
    /// - Taking the square root of a negative number
    /// - A factorial of a negative, fractional or too large value
    /// - Any operation whose result is infinite or NaN
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        let result = match self {
            Expression::Number(leaf) => Ok(leaf.value as f64),
            Expression::Add(l, r) => apply_binary(Operator::Add, l.evaluate()?, r.evaluate()?),
            Expression::Sub(l, r) => apply_binary(Operator::Sub, l.evaluate()?, r.evaluate()?),
            Expression::Mul(l, r) => apply_binary(Operator::Mul, l.evaluate()?, r.evaluate()?),
            Expression::Div(l, r) => apply_binary(Operator::Div, l.evaluate()?, r.evaluate()?),
            Expression::Pow(l, r) => apply_binary(Operator::Pow, l.evaluate()?, r.evaluate()?),
            Expression::Neg(e) => Ok(-e.evaluate()?),
            Expression::Sqrt(e) => apply_unary(Operator::Sqrt, e.evaluate()?),
            Expression::Cbrt(e) => apply_unary(Operator::Cbrt, e.evaluate()?),
            Expression::Factorial(e) => apply_unary(Operator::Factorial, e.evaluate()?),
        };

        if let Err(e) = &result {
            debug!("Expression evaluation failed: {}", e);
        }

        result
    }
}
