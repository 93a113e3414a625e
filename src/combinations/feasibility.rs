use log::trace;

use crate::combinations::constants::BOUND_SLACK;
use crate::expression::OperatorSet;
use crate::utils::digit_count;

/// Upper bound on the magnitude of any value reachable from `values` with
/// `+ - * /`.
///
/// Every such expression over integers is a fraction `p / q` with
/// `|p| + |q| <= Π(|v| + 1)` and `|q| >= 1`, so its magnitude never exceeds
/// `Π(|v| + 1) - 1`.
pub fn magnitude_bound<I>(values: I) -> f64
where
    I: IntoIterator<Item = i64>,
{
    values
        .into_iter()
        .map(|v| v.unsigned_abs() as f64 + 1.0)
        .product::<f64>()
        - 1.0
}

/// Like [`magnitude_bound`], but also covering every way of merging the
/// values into concatenated leaves.
///
/// A leaf with `d` digits satisfies `|leaf| + 1 <= 10^d`, and merging never
/// changes the total digit count, so `10^D - 1` bounds any grouping of values
/// holding `D` digits in all.
pub fn concatenation_bound<I>(values: I) -> f64
where
    I: IntoIterator<Item = i64>,
{
    let digits: usize = values.into_iter().map(digit_count).sum();
    10_f64.powi(i32::try_from(digits).unwrap_or(i32::MAX)) - 1.0
}

/// Returns false only when no expression over `values` can equal `target`.
///
/// The check never rejects a reachable target. It is skipped (always true)
/// when `^`, roots or factorials are enabled since those escape the bound.
/// With concatenation enabled the looser [`concatenation_bound`] applies.
pub fn can_reach<I>(values: I, target: f64, operators: OperatorSet) -> bool
where
    I: IntoIterator<Item = i64>,
{
    if !operators.is_elementary() {
        return true;
    }
    let bound = if operators.allows_concatenation() {
        concatenation_bound(values)
    } else {
        magnitude_bound(values)
    };
    let reachable = target.abs() <= bound + BOUND_SLACK;
    if !reachable {
        trace!("Target {} exceeds reachable magnitude {}", target, bound);
    }
    reachable
}
