//! Employee advances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_core::workflow::AdvanceStatus;
use tesorero_shared::types::{AdvanceId, Currency, ProviderId};

/// Advance as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    /// Advance id.
    pub id: AdvanceId,
    /// Who receives the money.
    pub beneficiary_id: ProviderId,
    /// Beneficiary display name.
    #[serde(default)]
    pub beneficiary_name: String,
    /// Currency.
    pub currency: Currency,
    /// Advanced amount.
    pub amount: Decimal,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Purpose.
    #[serde(default)]
    pub description: String,
    /// Lifecycle status.
    pub status: AdvanceStatus,
}

/// Body of the create-advance call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAdvance {
    /// Who receives the money.
    pub beneficiary_id: ProviderId,
    /// Currency.
    pub currency: Currency,
    /// Advanced amount.
    pub amount: Decimal,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Purpose.
    pub description: String,
}
