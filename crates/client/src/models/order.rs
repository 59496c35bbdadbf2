//! Purchase orders.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_core::document::{ArticleLine, PriceBasis, Totals};
use tesorero_core::workflow::OrderStatus;
use tesorero_shared::types::{Currency, InvoiceId, ProviderId, PurchaseOrderId};

/// Purchase order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Order id.
    pub id: PurchaseOrderId,
    /// Supplier.
    pub provider_id: ProviderId,
    /// Supplier display name.
    #[serde(default)]
    pub provider_name: String,
    /// Currency.
    pub currency: Currency,
    /// Order date.
    pub order_date: NaiveDate,
    /// Expected delivery date.
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    /// Whether unit prices include tax.
    #[serde(default)]
    pub basis: PriceBasis,
    /// Article lines.
    #[serde(default)]
    pub lines: Vec<ArticleLine>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Gross total.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Invoice generated from the order, once invoiced.
    #[serde(default)]
    pub invoice_id: Option<InvoiceId>,
}

/// Body of the create/update order calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    /// Supplier.
    pub provider_id: ProviderId,
    /// Currency.
    pub currency: Currency,
    /// Order date.
    pub order_date: NaiveDate,
    /// Expected delivery date.
    pub expected_date: Option<NaiveDate>,
    /// Whether unit prices include tax.
    pub basis: PriceBasis,
    /// Article lines.
    pub lines: Vec<ArticleLine>,
    /// Free-text notes.
    pub notes: String,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: Totals,
}

/// Body of the generate-invoice call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateInvoiceRequest {
    /// Series of the supplier's invoice.
    pub series: String,
    /// Number of the supplier's invoice.
    pub number: String,
    /// Issue date of the supplier's invoice.
    pub issue_date: NaiveDate,
}
