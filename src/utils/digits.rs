use log::debug;

use crate::utils::errors::UtilsError;

/// Number of decimal digits in `value`, ignoring the sign
pub fn digit_count(value: i64) -> usize {
    let mut n = value.unsigned_abs();
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Join operands by decimal concatenation (`[1, 2, 3]` -> `123`)
///
/// # Errors
///
/// Returns an error if fewer than two values are given, any value is
/// negative, the first value is zero (a leading zero), or the result does not
/// fit in an `i64`.
pub fn concat_digits(values: &[i64]) -> Result<i64, UtilsError> {
    debug!("Concatenating {:?}", values);

    if values.len() < 2 {
        return Err(UtilsError::InvalidConcatenation(
            values.to_vec(),
            "need at least two values",
        ));
    }
    if values.iter().any(|v| *v < 0) {
        return Err(UtilsError::InvalidConcatenation(
            values.to_vec(),
            "negative values cannot be concatenated",
        ));
    }
    if values.first() == Some(&0) {
        debug!("Rejecting concatenation with leading zero: {:?}", values);
        return Err(UtilsError::InvalidConcatenation(
            values.to_vec(),
            "leading zero",
        ));
    }

    values.iter().try_fold(0_i64, |acc, &value| {
        let shift = 10_i64
            .checked_pow(digit_count(value) as u32)
            .and_then(|scale| acc.checked_mul(scale))
            .and_then(|shifted| shifted.checked_add(value));
        shift.ok_or_else(|| UtilsError::InvalidConcatenation(values.to_vec(), "overflow"))
    })
}
