//! Reference data shown in selects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_shared::types::{
    AccountId, ArticleId, BusinessLineId, CategoryId, CostCenterId, Currency, CurrencyId,
    ProviderId,
};

/// Supplier or employee. Advances are paid to employees registered as providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider id.
    pub id: ProviderId,
    /// Business or person name.
    pub name: String,
    /// Tax id (RUC/DNI), when known.
    #[serde(default)]
    pub document_number: Option<String>,
}

/// Body of the provider quick-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProvider {
    /// Business or person name.
    pub name: String,
}

/// Currency as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOption {
    /// Currency record id.
    pub id: CurrencyId,
    /// ISO code.
    pub code: Currency,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// Cash or bank account payments are made from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account id.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Currency the account is held in.
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Business line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessLine {
    /// Business line id.
    pub id: BusinessLineId,
    /// Display name.
    pub name: String,
}

/// Cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center id.
    pub id: CostCenterId,
    /// Display name.
    pub name: String,
}

/// Inventory item ordered on purchase orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Article id.
    pub id: ArticleId,
    /// Display name.
    pub name: String,
    /// Reference purchase price.
    #[serde(default)]
    pub unit_price: Decimal,
    /// Unit of measure.
    #[serde(default)]
    pub unit: Option<String>,
}
