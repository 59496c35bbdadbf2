//! Payment request shared by advances, invoices and drafts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_core::payment::{PaymentMethod, PaymentRow};
use tesorero_shared::types::AccountId;

/// A single payment registered against a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Account the money leaves from.
    pub account_id: AccountId,
    /// Payment method.
    pub method: PaymentMethod,
    /// Paid amount.
    pub amount: Decimal,
    /// Date of the payment.
    pub payment_date: NaiveDate,
    /// Operation or check number.
    #[serde(default)]
    pub reference: String,
}

impl PaymentRequest {
    /// Builds a request from a form row. Returns `None` without an account.
    #[must_use]
    pub fn from_row(row: &PaymentRow, payment_date: NaiveDate) -> Option<Self> {
        Some(Self {
            account_id: row.account_id.clone()?,
            method: row.method,
            amount: row.amount,
            payment_date,
            reference: row.reference.clone(),
        })
    }
}
