use log::{debug, warn};

use crate::utils::errors::UtilsError;

/// Largest operand multiset the engine accepts
pub const MAX_OPERANDS: usize = 8;

/// # Errors
///
/// Returns an error if the string is empty or contains any non-ASCII-digit characters.
pub fn validate_digit_string(digit_string: &str) -> Result<(), UtilsError> {
    debug!("Validating digit string: '{}'", digit_string);

    if digit_string.is_empty() {
        warn!("Digit string is empty");
        return Err(UtilsError::EmptyDigitString);
    }

    if !digit_string.chars().all(|c| c.is_ascii_digit()) {
        warn!(
            "Digit string contains non-digit characters: '{}'",
            digit_string
        );
        return Err(UtilsError::InvalidDigitString(digit_string.to_string()));
    }

    debug!("Digit string validation successful");
    Ok(())
}

/// # Errors
///
/// Returns an error if there are no operands or more than [`MAX_OPERANDS`].
pub fn validate_operands(operands: &[i64]) -> Result<(), UtilsError> {
    if operands.is_empty() {
        warn!("Operand list is empty");
        return Err(UtilsError::NoOperands);
    }
    if operands.len() > MAX_OPERANDS {
        warn!("Operand list too long: {}", operands.len());
        return Err(UtilsError::TooManyOperands {
            count: operands.len(),
            max: MAX_OPERANDS,
        });
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the target is NaN or infinite.
pub fn validate_target(target: f64) -> Result<(), UtilsError> {
    if target.is_finite() {
        Ok(())
    } else {
        Err(UtilsError::NonFiniteTarget(target))
    }
}

/// Read an operand list from text.
///
/// A plain digit string such as `"1234"` is read one digit per operand; a list
/// separated by commas or whitespace (`"1, 2, 10"`) is read one integer per
/// entry.
///
/// # Errors
///
/// Returns an error for empty input, malformed entries, or more than
/// [`MAX_OPERANDS`] operands.
pub fn parse_operands(text: &str) -> Result<Vec<i64>, UtilsError> {
    let trimmed = text.trim();
    let is_list = trimmed.contains(',') || trimmed.contains(char::is_whitespace);

    let operands = if is_list {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| UtilsError::InvalidOperand(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        validate_digit_string(trimmed)?;
        trimmed
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect()
    };

    validate_operands(&operands)?;
    debug!("Parsed operands {:?} from '{}'", operands, text);
    Ok(operands)
}
