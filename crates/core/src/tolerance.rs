//! Commit tolerance for amount sums.
//!
//! Equal splits are rounded to cents without remainder correction, so the sum
//! of the parts may miss the document total. A miss of a full cent or more
//! blocks the commit until a row is adjusted by hand.

use rust_decimal::Decimal;

/// Smallest absolute difference between a sum of parts and its total that
/// blocks a commit.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns true when `|sum - required| < 0.01`.
#[must_use]
pub fn within_tolerance(sum: Decimal, required: Decimal) -> bool {
    (sum - required).abs() < TOLERANCE
}
