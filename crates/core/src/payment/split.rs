//! Payment splitter.
//!
//! Overwrites every payment row with an equal share of the document total,
//! rounded to cents. The remainder is NOT redistributed: 100.00 over three
//! rows gives 33.33 each (sum 99.99), which [`validate_payments`] rejects
//! until a row is adjusted by hand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_shared::types::{AccountId, round_amount};

use super::error::PaymentError;
use crate::tolerance::within_tolerance;

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Bank transfer.
    #[default]
    Transfer,
    /// Check.
    Check,
    /// Card.
    Card,
    /// Bank deposit.
    Deposit,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Check => "check",
            Self::Card => "card",
            Self::Deposit => "deposit",
        }
    }
}

/// One payment row of an expense or invoice payment form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Account the money leaves from.
    pub account_id: Option<AccountId>,
    /// Payment method.
    pub method: PaymentMethod,
    /// Paid amount.
    pub amount: Decimal,
    /// Operation number, check number, etc.
    #[serde(default)]
    pub reference: String,
}

impl PaymentRow {
    /// Creates a row for an account and amount.
    #[must_use]
    pub fn new(account_id: AccountId, method: PaymentMethod, amount: Decimal) -> Self {
        Self {
            account_id: Some(account_id),
            method,
            amount,
            reference: String::new(),
        }
    }
}

/// Equal share of `total` over `count` rows, rounded to cents.
///
/// Returns `None` when `count` is zero.
#[must_use]
pub fn equal_share(total: Decimal, count: usize) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    Some(round_amount(total / Decimal::from(count as u64)))
}

/// Overwrites every row amount with [`equal_share`]. No-op for zero rows.
pub fn split_evenly(total: Decimal, rows: &mut [PaymentRow]) {
    let Some(share) = equal_share(total, rows.len()) else {
        return;
    };
    for row in rows.iter_mut() {
        row.amount = share;
    }
}

/// Sum of the row amounts.
#[must_use]
pub fn payments_total(rows: &[PaymentRow]) -> Decimal {
    rows.iter().map(|row| row.amount).sum()
}

/// Validates payment rows against the document total.
///
/// # Errors
///
/// Returns the first violated rule: no rows, a row without account or with a
/// non-positive amount, or a sum that misses `document_total` by 0.01 or more.
pub fn validate_payments(rows: &[PaymentRow], document_total: Decimal) -> Result<(), PaymentError> {
    if rows.is_empty() {
        return Err(PaymentError::NoPayments);
    }

    for (idx, row) in rows.iter().enumerate() {
        if row.account_id.is_none() {
            return Err(PaymentError::MissingAccount { row: idx + 1 });
        }
        if row.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount { row: idx + 1 });
        }
    }

    let paid = payments_total(rows);
    let required = round_amount(document_total);
    if !within_tolerance(paid, required) {
        return Err(PaymentError::SumMismatch { paid, required });
    }

    Ok(())
}
