//! Document total calculator.
//!
//! Maps a set of lines and a [`PriceBasis`] to `{subtotal, tax, total}`.
//! The calculation is pure and re-run from scratch on every edit; nothing is
//! accumulated between calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_shared::types::round_amount;

use super::error::DocumentError;
use super::lines::{PriceBasis, TaxableLine};

/// Sales tax rate (IGV), 18%.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// A validated tax rate in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// The standard 18% rate.
    pub const STANDARD: Self = Self(TAX_RATE);

    /// Validates a rate.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidTaxRate` when the rate is negative or
    /// not below 1.
    pub fn new(rate: Decimal) -> Result<Self, DocumentError> {
        if rate.is_sign_negative() || rate >= Decimal::ONE {
            return Err(DocumentError::InvalidTaxRate(rate));
        }
        Ok(Self(rate))
    }

    /// Returns the rate as a fraction (0.18).
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = DocumentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

/// Derived document totals. `total == subtotal + tax` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
}

impl Totals {
    /// Builds totals from their parts; the total is always derived.
    #[must_use]
    pub fn from_parts(subtotal: Decimal, tax: Decimal) -> Self {
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Sum of net amounts.
    #[must_use]
    pub const fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Sum of tax portions.
    #[must_use]
    pub const fn tax(&self) -> Decimal {
        self.tax
    }

    /// `subtotal + tax`.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Totals rounded to cents for display and submission.
    ///
    /// Subtotal and tax are rounded independently and the total is their sum,
    /// so the identity still holds after rounding.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::from_parts(round_amount(self.subtotal), round_amount(self.tax))
    }
}

/// Computes totals with the standard 18% rate.
#[must_use]
pub fn calculate_totals<L: TaxableLine>(lines: &[L], basis: PriceBasis) -> Totals {
    calculate_totals_with_rate(lines, basis, TaxRate::STANDARD)
}

/// Computes totals with an explicit rate.
///
/// Per line:
/// - tax included: `net = amount / (1 + rate)`, tax portion `amount - net`
///   when the line is taxed, else 0;
/// - tax excluded: `net = amount`, tax portion `amount * rate` when taxed,
///   else 0.
///
/// In tax-included mode an untaxed line still has its net back-calculated.
#[must_use]
pub fn calculate_totals_with_rate<L: TaxableLine>(
    lines: &[L],
    basis: PriceBasis,
    rate: TaxRate,
) -> Totals {
    let rate = rate.value();
    let divisor = Decimal::ONE + rate;

    let (subtotal, tax) = lines
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(subtotal, tax), line| {
            let amount = line.line_amount();
            let (net, portion) = match basis {
                PriceBasis::TaxIncluded => {
                    let net = amount / divisor;
                    let portion = if line.tax_applies() {
                        amount - net
                    } else {
                        Decimal::ZERO
                    };
                    (net, portion)
                }
                PriceBasis::TaxExcluded => {
                    let portion = if line.tax_applies() {
                        amount * rate
                    } else {
                        Decimal::ZERO
                    };
                    (amount, portion)
                }
            };
            (subtotal + net, tax + portion)
        });

    Totals::from_parts(subtotal, tax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::lines::{ArticleLine, LineItem};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tesorero_shared::types::{ArticleId, CategoryId};

    fn line(amount: Decimal, tax_applies: bool) -> LineItem {
        LineItem::new(CategoryId::from(1), amount).with_tax(tax_applies)
    }

    #[test]
    fn test_single_tax_included_line() {
        let totals = calculate_totals(&[line(dec!(1000.00), true)], PriceBasis::TaxIncluded);
        let rounded = totals.rounded();
        assert_eq!(rounded.subtotal(), dec!(847.46));
        assert_eq!(rounded.tax(), dec!(152.54));
        assert_eq!(rounded.total(), dec!(1000.00));
        assert_eq!(totals.total(), dec!(1000.00));
    }

    #[test]
    fn test_tax_excluded_adds_tax() {
        let totals = calculate_totals(&[line(dec!(100), true)], PriceBasis::TaxExcluded);
        assert_eq!(totals.subtotal(), dec!(100));
        assert_eq!(totals.tax(), dec!(18.00));
        assert_eq!(totals.total(), dec!(118.00));
    }

    #[rstest]
    #[case(PriceBasis::TaxExcluded, dec!(100), dec!(0), dec!(100))]
    #[case(PriceBasis::TaxIncluded, dec!(100), dec!(0), dec!(84.75))]
    fn test_untaxed_line(
        #[case] basis: PriceBasis,
        #[case] amount: Decimal,
        #[case] expected_tax: Decimal,
        #[case] expected_total: Decimal,
    ) {
        let totals = calculate_totals(&[line(amount, false)], basis).rounded();
        assert_eq!(totals.tax(), expected_tax);
        assert_eq!(totals.total(), expected_total);
    }

    #[test]
    fn test_mixed_lines_tax_excluded() {
        let lines = vec![line(dec!(200), true), line(dec!(50), false)];
        let totals = calculate_totals(&lines, PriceBasis::TaxExcluded);
        assert_eq!(totals.subtotal(), dec!(250));
        assert_eq!(totals.tax(), dec!(36));
        assert_eq!(totals.total(), dec!(286));
    }

    #[test]
    fn test_article_lines_use_quantity_times_price() {
        let lines = vec![
            ArticleLine::new(ArticleId::from(1), dec!(2), dec!(50)),
            ArticleLine::new(ArticleId::from(2), dec!(4), dec!(25)),
        ];
        let totals = calculate_totals(&lines, PriceBasis::TaxExcluded);
        assert_eq!(totals.subtotal(), dec!(200));
        assert_eq!(totals.tax(), dec!(36));
    }

    #[test]
    fn test_empty_lines_are_zero() {
        let totals = calculate_totals::<LineItem>(&[], PriceBasis::TaxIncluded);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_custom_rate() {
        let rate = TaxRate::new(dec!(0.10)).unwrap();
        let totals = calculate_totals_with_rate(&[line(dec!(110), true)], PriceBasis::TaxIncluded, rate);
        assert_eq!(totals.subtotal(), dec!(100));
        assert_eq!(totals.tax(), dec!(10));
    }

    #[rstest]
    #[case(dec!(-0.01))]
    #[case(dec!(1))]
    #[case(dec!(1.5))]
    fn test_invalid_rate(#[case] rate: Decimal) {
        assert!(matches!(
            TaxRate::new(rate),
            Err(DocumentError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn test_rounded_keeps_identity() {
        let totals = Totals::from_parts(dec!(10.005), dec!(1.8009));
        let rounded = totals.rounded();
        assert_eq!(rounded.subtotal(), dec!(10.01));
        assert_eq!(rounded.tax(), dec!(1.80));
        assert_eq!(rounded.total(), dec!(11.81));
    }
}
