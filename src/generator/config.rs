use serde::{Deserialize, Serialize};

use crate::expression::{OperatorSet, is_integer};
use crate::generator::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DIGIT_VALUE, DEFAULT_OPERAND_COUNT, DEFAULT_TARGET_MAX,
    DEFAULT_TARGET_MIN,
};
use crate::generator::errors::GeneratorError;
use crate::utils::MAX_OPERANDS;

/// Inclusive range of acceptable targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: i64,
    pub max: i64,
}

impl TargetRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub operand_count: usize,
    pub operators: OperatorSet,
    pub target_range: TargetRange,
    pub must_use_all: bool,
    /// Operands are drawn without repetition from `0..=max_digit_value`
    pub max_digit_value: i64,
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            operand_count: DEFAULT_OPERAND_COUNT,
            operators: OperatorSet::basic(),
            target_range: TargetRange::new(DEFAULT_TARGET_MIN, DEFAULT_TARGET_MAX),
            must_use_all: false,
            max_digit_value: DEFAULT_MAX_DIGIT_VALUE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    ///
    /// Returns an error for a configuration no puzzle can satisfy.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.operand_count == 0 {
            return Err(GeneratorError::NoOperands);
        }
        if self.operand_count > MAX_OPERANDS {
            return Err(GeneratorError::TooManyOperands {
                count: self.operand_count,
                max: MAX_OPERANDS,
            });
        }
        let available = usize::try_from(self.max_digit_value.saturating_add(1)).unwrap_or(0);
        if self.operand_count > available {
            return Err(GeneratorError::NotEnoughDigits {
                requested: self.operand_count,
                max_digit_value: self.max_digit_value,
            });
        }
        if self.target_range.is_empty() {
            return Err(GeneratorError::EmptyRange {
                min: self.target_range.min,
                max: self.target_range.max,
            });
        }
        if self.operand_count > 1 && !self.operators.has_binary() {
            return Err(GeneratorError::NoBinaryOperator(self.operand_count));
        }
        Ok(())
    }

    /// `value` as a target: a finite integer inside the range that differs
    /// from every operand
    pub fn accepted_target(&self, value: f64, operands: &[i64]) -> Option<i64> {
        if !value.is_finite() || !is_integer(value) {
            return None;
        }
        let range = self.target_range;
        if value < range.min as f64 || value > range.max as f64 {
            return None;
        }
        let target = value.round() as i64;
        if !range.contains(target) || operands.contains(&target) {
            return None;
        }
        Some(target)
    }
}
