//! Amount formatting.

use num_format::{Locale, ToFormattedString as _};
use rust_decimal::Decimal;
use tesorero_shared::types::{AMOUNT_DECIMALS, Money, round_amount};

/// Splits a rounded amount into its sign, grouped integer part and cents.
fn parts(amount: Decimal) -> (bool, String, u32) {
    let mut rounded = round_amount(amount);
    rounded.rescale(AMOUNT_DECIMALS);
    let cents = rounded.mantissa();
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_formatted_string(&Locale::en);
    // `cents % 100` is below 100.
    #[allow(clippy::cast_possible_truncation)]
    let fraction = (cents % 100) as u32;
    (negative, whole, fraction)
}

/// Formats an amount as `1,234.50`. Negative amounts get a leading `-`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let (negative, whole, fraction) = parts(amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{whole}.{fraction:02}")
}

/// Formats money with its symbol, e.g. `S/ 1,234.50` or `-S/ 12.00`.
#[must_use]
pub fn format_money(money: &Money) -> String {
    let (negative, whole, fraction) = parts(money.amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{} {whole}.{fraction:02}", money.currency.symbol())
}
