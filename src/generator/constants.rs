// Configuration constants for puzzle generation
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;
pub const DEFAULT_MAX_DIGIT_VALUE: i64 = 9;
pub const DEFAULT_OPERAND_COUNT: usize = 4;
pub const DEFAULT_TARGET_MIN: i64 = 10;
pub const DEFAULT_TARGET_MAX: i64 = 50;

pub const UNARY_PROBABILITY: f64 = 0.2;
pub const CONCAT_PROBABILITY: f64 = 0.25;
/// Largest exponent the generator will raise to
pub const MAX_GENERATED_EXPONENT: f64 = 3.0;
pub const MAX_GENERATED_FACTORIAL: f64 = 6.0;
