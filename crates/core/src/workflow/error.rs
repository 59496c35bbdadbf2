//! Workflow error types for document lifecycle rules.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when checking a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The document's current status does not allow the action.
    #[error("Cannot change a {from} document to {to}")]
    InvalidTransition {
        /// The current status.
        from: &'static str,
        /// The attempted target status.
        to: &'static str,
    },

    /// The document can no longer be edited.
    #[error("A {0} document can no longer be edited")]
    NotEditable(&'static str),

    /// At least one draft already received money.
    #[error("The exchange cannot be reverted because some drafts have payments")]
    DraftsHavePayments,

    /// There is nothing left to exchange or pay.
    #[error("The document has no outstanding balance")]
    NoBalance,

    /// A payment amount is zero or negative.
    #[error("Payment amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// A payment exceeds what is owed.
    #[error("Payment of {amount} exceeds the outstanding balance of {balance}")]
    ExceedsBalance {
        /// The attempted payment.
        amount: Decimal,
        /// The outstanding balance.
        balance: Decimal,
    },

    /// Void reason is required but not provided.
    #[error("Void reason is required")]
    VoidReasonRequired,

    /// Invoice number is required but not provided.
    #[error("Invoice number is required")]
    InvoiceNumberRequired,
}

impl WorkflowError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::DraftsHavePayments => "DRAFTS_HAVE_PAYMENTS",
            Self::NoBalance => "NO_BALANCE",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::ExceedsBalance { .. } => "EXCEEDS_BALANCE",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::InvoiceNumberRequired => "INVOICE_NUMBER_REQUIRED",
        }
    }
}
