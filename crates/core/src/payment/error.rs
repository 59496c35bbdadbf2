//! Payment validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating payment rows before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// No payment rows were entered.
    #[error("At least one payment is required")]
    NoPayments,

    /// A payment row has no account.
    #[error("Payment {row}: account is required")]
    MissingAccount {
        /// 1-based row number.
        row: usize,
    },

    /// A payment row amount is zero or negative.
    #[error("Payment {row}: amount must be positive")]
    NonPositiveAmount {
        /// 1-based row number.
        row: usize,
    },

    /// Payment rows do not add up to the document total.
    #[error("Payments add up to {paid}, but the document total is {required}")]
    SumMismatch {
        /// Sum of the payment rows.
        paid: Decimal,
        /// Document total.
        required: Decimal,
    },
}

impl PaymentError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoPayments => "NO_PAYMENTS",
            Self::MissingAccount { .. } => "MISSING_ACCOUNT",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::SumMismatch { .. } => "PAYMENT_SUM_MISMATCH",
        }
    }
}
