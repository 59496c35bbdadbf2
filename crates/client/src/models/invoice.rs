//! Supplier invoices and their drafts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_core::document::{LineItem, PriceBasis, Totals};
use tesorero_core::schedule::DraftPreview;
use tesorero_core::workflow::{DraftSnapshot, DraftStatus, InvoiceStatus};
use tesorero_shared::types::{Currency, DraftId, InvoiceId, ProviderId};

/// Supplier invoice as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInvoice {
    /// Invoice id.
    pub id: InvoiceId,
    /// Supplier.
    pub provider_id: ProviderId,
    /// Supplier display name.
    #[serde(default)]
    pub provider_name: String,
    /// Currency.
    pub currency: Currency,
    /// Document series (e.g. `F001`).
    #[serde(default)]
    pub series: String,
    /// Document number.
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Whether line amounts include tax.
    #[serde(default)]
    pub basis: PriceBasis,
    /// Category lines.
    #[serde(default)]
    pub lines: Vec<LineItem>,
    /// Net base.
    pub subtotal: Decimal,
    /// Tax.
    pub tax: Decimal,
    /// Gross total.
    pub total: Decimal,
    /// Amount still owed.
    pub balance: Decimal,
    /// Lifecycle status.
    pub status: InvoiceStatus,
}

impl SupplierInvoice {
    /// Amount paid so far.
    #[must_use]
    pub fn paid(&self) -> Decimal {
        self.total - self.balance
    }

    /// Whether any payment has been applied.
    #[must_use]
    pub fn has_payments(&self) -> bool {
        self.paid() > Decimal::ZERO
    }

    /// Whether header and lines may still be changed.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable(self.has_payments())
    }

    /// Sum a draft schedule must match on exchange: the total while nothing
    /// has been paid, the balance afterwards.
    #[must_use]
    pub fn exchange_target(&self) -> Decimal {
        if self.has_payments() {
            self.balance
        } else {
            self.total
        }
    }
}

/// Body of the create/update invoice calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicePayload {
    /// Supplier.
    pub provider_id: ProviderId,
    /// Currency.
    pub currency: Currency,
    /// Document series.
    pub series: String,
    /// Document number.
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Whether line amounts include tax.
    pub basis: PriceBasis,
    /// Category lines.
    pub lines: Vec<LineItem>,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Body of the void calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoidRequest {
    /// Why the document is voided.
    pub reason: String,
}

/// Body of the exchange call: the committed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRequest {
    /// Drafts in sequence order.
    pub drafts: Vec<DraftPreview>,
}

/// Installment draft created by an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Draft id.
    pub id: DraftId,
    /// Invoice the draft belongs to.
    pub invoice_id: InvoiceId,
    /// 1-based position.
    pub sequence: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount due.
    pub amount: Decimal,
    /// Amount paid so far.
    #[serde(default)]
    pub paid: Decimal,
    /// Lifecycle status.
    pub status: DraftStatus,
}

impl Draft {
    /// Amount still owed.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.amount - self.paid
    }

    /// What the revert precheck needs.
    #[must_use]
    pub const fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            status: self.status,
            paid: self.paid,
        }
    }
}
