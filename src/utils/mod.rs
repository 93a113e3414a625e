//! Utils module split into submodules

mod digits;
mod errors;
mod validation;

pub use digits::{concat_digits, digit_count};
pub use errors::UtilsError;
pub use validation::{
    MAX_OPERANDS, parse_operands, validate_digit_string, validate_operands, validate_target,
};
