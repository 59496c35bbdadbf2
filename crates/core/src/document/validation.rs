//! Business rule validation for document lines.

use rust_decimal::Decimal;

use super::error::DocumentError;
use super::lines::{ArticleLine, LineItem};
use super::totals::Totals;

/// Validates category lines of an invoice or expense.
///
/// # Errors
///
/// Returns the first violated rule, with 1-based line numbers.
pub fn validate_line_items(lines: &[LineItem]) -> Result<(), DocumentError> {
    if lines.is_empty() {
        return Err(DocumentError::NoLines);
    }

    for (idx, line) in lines.iter().enumerate() {
        let number = idx + 1;
        if line.category_id.is_none() {
            return Err(DocumentError::MissingCategory { line: number });
        }
        if line.amount.is_sign_negative() && !line.amount.is_zero() {
            return Err(DocumentError::NegativeAmount { line: number });
        }
    }

    Ok(())
}

/// Validates article lines of a purchase order.
///
/// # Errors
///
/// Returns the first violated rule, with 1-based line numbers.
pub fn validate_article_lines(lines: &[ArticleLine]) -> Result<(), DocumentError> {
    if lines.is_empty() {
        return Err(DocumentError::NoLines);
    }

    for (idx, line) in lines.iter().enumerate() {
        let number = idx + 1;
        if line.article_id.is_none() {
            return Err(DocumentError::MissingArticle { line: number });
        }
        if line.quantity <= Decimal::ZERO {
            return Err(DocumentError::NonPositiveQuantity { line: number });
        }
        if line.unit_price < Decimal::ZERO {
            return Err(DocumentError::NegativeUnitPrice { line: number });
        }
    }

    Ok(())
}

/// Rejects documents whose rounded total is not positive.
///
/// # Errors
///
/// Returns `DocumentError::NonPositiveTotal`.
pub fn validate_positive_total(totals: &Totals) -> Result<(), DocumentError> {
    let total = totals.rounded().total();
    if total <= Decimal::ZERO {
        return Err(DocumentError::NonPositiveTotal(total));
    }
    Ok(())
}
