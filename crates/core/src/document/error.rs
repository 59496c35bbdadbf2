//! Document validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating document lines before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The document has no lines.
    #[error("Document must have at least one line")]
    NoLines,

    /// A line has no category.
    #[error("Line {line}: category is required")]
    MissingCategory {
        /// 1-based line number.
        line: usize,
    },

    /// A line has a negative amount.
    #[error("Line {line}: amount cannot be negative")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// An article line has no article.
    #[error("Line {line}: article is required")]
    MissingArticle {
        /// 1-based line number.
        line: usize,
    },

    /// An article line has a zero or negative quantity.
    #[error("Line {line}: quantity must be positive")]
    NonPositiveQuantity {
        /// 1-based line number.
        line: usize,
    },

    /// An article line has a negative unit price.
    #[error("Line {line}: unit price cannot be negative")]
    NegativeUnitPrice {
        /// 1-based line number.
        line: usize,
    },

    /// The document total is zero or negative.
    #[error("Document total must be positive, got {0}")]
    NonPositiveTotal(Decimal),

    /// Tax rate outside `[0, 1)`.
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(Decimal),
}

impl DocumentError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoLines => "NO_LINES",
            Self::MissingCategory { .. } => "MISSING_CATEGORY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::MissingArticle { .. } => "MISSING_ARTICLE",
            Self::NonPositiveQuantity { .. } => "NON_POSITIVE_QUANTITY",
            Self::NegativeUnitPrice { .. } => "NEGATIVE_UNIT_PRICE",
            Self::NonPositiveTotal(_) => "NON_POSITIVE_TOTAL",
            Self::InvalidTaxRate(_) => "INVALID_TAX_RATE",
        }
    }
}
