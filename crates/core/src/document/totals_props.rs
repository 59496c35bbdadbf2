//! Property-based tests for the document total calculator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tesorero_shared::types::{ArticleId, CategoryId};

use super::lines::{ArticleLine, LineItem, PriceBasis};
use super::totals::{TAX_RATE, calculate_totals};

/// Strategy to generate a non-negative amount from 0.00 to 100,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn line_strategy() -> impl Strategy<Value = LineItem> {
    (amount(), any::<bool>())
        .prop_map(|(amount, taxed)| LineItem::new(CategoryId::from(1), amount).with_tax(taxed))
}

fn lines_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_strategy(), 0..12)
}

/// Differences below this are Decimal precision noise, far under a cent.
fn negligible() -> Decimal {
    Decimal::new(1, 12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Tax included: total - tax == subtotal, and the tax equals 18% of the
    /// net over taxed lines only.
    #[test]
    fn prop_tax_included_identity(lines in lines_strategy()) {
        let totals = calculate_totals(&lines, PriceBasis::TaxIncluded);
        prop_assert!((totals.total() - totals.tax() - totals.subtotal()).abs() < negligible());

        let divisor = Decimal::ONE + TAX_RATE;
        let expected_tax: Decimal = lines
            .iter()
            .filter(|l| l.tax_applies)
            .map(|l| (l.amount / divisor) * TAX_RATE)
            .sum();
        prop_assert!(
            (totals.tax() - expected_tax).abs() < negligible(),
            "tax {} vs expected {}",
            totals.tax(),
            expected_tax
        );
    }

    /// Tax excluded: subtotal is exactly the sum of entered amounts,
    /// whatever the tax flags.
    #[test]
    fn prop_tax_excluded_subtotal_is_sum(lines in lines_strategy()) {
        let totals = calculate_totals(&lines, PriceBasis::TaxExcluded);
        let sum: Decimal = lines.iter().map(|l| l.amount).sum();
        prop_assert_eq!(totals.subtotal(), sum);
        prop_assert_eq!(totals.total(), totals.subtotal() + totals.tax());
    }

    /// Recomputing with the same inputs gives the same outputs.
    #[test]
    fn prop_calculation_is_idempotent(
        lines in lines_strategy(),
        included in any::<bool>(),
    ) {
        let basis = PriceBasis::from_includes_tax(included);
        let first = calculate_totals(&lines, basis);
        let second = calculate_totals(&lines, basis);
        prop_assert_eq!(first, second);
    }

    /// Rounded totals keep total == subtotal + tax.
    #[test]
    fn prop_rounded_identity(lines in lines_strategy(), included in any::<bool>()) {
        let rounded = calculate_totals(&lines, PriceBasis::from_includes_tax(included)).rounded();
        prop_assert_eq!(rounded.total(), rounded.subtotal() + rounded.tax());
        prop_assert!(rounded.subtotal().scale() <= 2);
    }

    /// Article lines price as quantity * unit price.
    #[test]
    fn prop_article_lines_match_category_lines(
        quantity in 1i64..1_000,
        price_cents in 0i64..1_000_000,
        taxed in any::<bool>(),
    ) {
        let unit_price = Decimal::new(price_cents, 2);
        let quantity = Decimal::from(quantity);
        let mut article = ArticleLine::new(ArticleId::from(1), quantity, unit_price);
        article.tax_applies = taxed;
        let category = LineItem::new(CategoryId::from(1), quantity * unit_price).with_tax(taxed);

        for basis in [PriceBasis::TaxIncluded, PriceBasis::TaxExcluded] {
            prop_assert_eq!(
                calculate_totals(std::slice::from_ref(&article), basis),
                calculate_totals(std::slice::from_ref(&category), basis)
            );
        }
    }
}
