//! Expenses, registered together with their payments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_core::document::{LineItem, PriceBasis, Totals};
use tesorero_core::payment::PaymentRow;
use tesorero_core::workflow::ExpenseStatus;
use tesorero_shared::types::{Currency, ExpenseId};

/// Expense as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense id.
    pub id: ExpenseId,
    /// What was spent on.
    pub description: String,
    /// Currency.
    pub currency: Currency,
    /// Date of the expense.
    pub expense_date: NaiveDate,
    /// Whether line amounts include tax.
    #[serde(default)]
    pub basis: PriceBasis,
    /// Category lines.
    #[serde(default)]
    pub lines: Vec<LineItem>,
    /// Payments made.
    #[serde(default)]
    pub payments: Vec<PaymentRow>,
    /// Gross total.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: ExpenseStatus,
}

/// Body of the create-expense call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpensePayload {
    /// What was spent on.
    pub description: String,
    /// Currency.
    pub currency: Currency,
    /// Date of the expense.
    pub expense_date: NaiveDate,
    /// Whether line amounts include tax.
    pub basis: PriceBasis,
    /// Category lines.
    pub lines: Vec<LineItem>,
    /// Payments made.
    pub payments: Vec<PaymentRow>,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: Totals,
}
