//! The back-office REST collaborator.

use async_trait::async_trait;
use tesorero_shared::types::{
    AdvanceId, DraftId, ExpenseId, InvoiceId, ListFilter, PurchaseOrderId,
};

use crate::error::ApiResult;
use crate::models::{
    Account, Advance, BusinessLine, Category, CostCenter, CurrencyOption, Draft, ExchangeRequest,
    Expense, ExpensePayload, GenerateInvoiceRequest, InventoryItem, InvoicePayload, NewAdvance,
    NewProvider, OrderPayload, PaymentRequest, Provider, PurchaseOrder, SupplierInvoice,
    VoidRequest,
};

/// Operations the screens need from the backend.
///
/// List calls return whole collections; mutating calls return the created
/// or updated record.
#[async_trait]
pub trait BackofficeApi: Send + Sync {
    // Reference data
    /// Lists providers (suppliers and employees).
    async fn list_providers(&self) -> ApiResult<Vec<Provider>>;
    /// Lists currencies.
    async fn list_currencies(&self) -> ApiResult<Vec<CurrencyOption>>;
    /// Lists expense categories.
    async fn list_categories(&self) -> ApiResult<Vec<Category>>;
    /// Lists cash and bank accounts.
    async fn list_accounts(&self) -> ApiResult<Vec<Account>>;
    /// Lists business lines.
    async fn list_business_lines(&self) -> ApiResult<Vec<BusinessLine>>;
    /// Lists cost centers.
    async fn list_cost_centers(&self) -> ApiResult<Vec<CostCenter>>;
    /// Lists inventory items.
    async fn list_inventory_items(&self) -> ApiResult<Vec<InventoryItem>>;
    /// Quick-creates a provider from a name.
    async fn create_provider(&self, provider: &NewProvider) -> ApiResult<Provider>;

    // Advances
    /// Lists advances.
    async fn list_advances(&self, filter: &ListFilter) -> ApiResult<Vec<Advance>>;
    /// Creates an advance.
    async fn create_advance(&self, advance: &NewAdvance) -> ApiResult<Advance>;
    /// Pays out an advance.
    async fn pay_advance(&self, id: &AdvanceId, payment: &PaymentRequest) -> ApiResult<Advance>;
    /// Voids an advance.
    async fn void_advance(&self, id: &AdvanceId) -> ApiResult<Advance>;

    // Supplier invoices
    /// Lists supplier invoices.
    async fn list_invoices(&self, filter: &ListFilter) -> ApiResult<Vec<SupplierInvoice>>;
    /// Creates a supplier invoice.
    async fn create_invoice(&self, invoice: &InvoicePayload) -> ApiResult<SupplierInvoice>;
    /// Replaces an editable invoice.
    async fn update_invoice(
        &self,
        id: &InvoiceId,
        invoice: &InvoicePayload,
    ) -> ApiResult<SupplierInvoice>;
    /// Registers a payment against an invoice.
    async fn pay_invoice(
        &self,
        id: &InvoiceId,
        payment: &PaymentRequest,
    ) -> ApiResult<SupplierInvoice>;
    /// Voids an invoice.
    async fn void_invoice(&self, id: &InvoiceId, request: &VoidRequest)
    -> ApiResult<SupplierInvoice>;
    /// Replaces the invoice balance with a draft schedule.
    async fn exchange_invoice(
        &self,
        id: &InvoiceId,
        request: &ExchangeRequest,
    ) -> ApiResult<SupplierInvoice>;
    /// Undoes an exchange, deleting its drafts.
    async fn revert_exchange(&self, id: &InvoiceId) -> ApiResult<SupplierInvoice>;
    /// Lists the drafts of an exchanged invoice.
    async fn list_drafts(&self, id: &InvoiceId) -> ApiResult<Vec<Draft>>;
    /// Registers a payment against a draft.
    async fn pay_draft(&self, id: &DraftId, payment: &PaymentRequest) -> ApiResult<Draft>;

    // Expenses
    /// Lists expenses.
    async fn list_expenses(&self, filter: &ListFilter) -> ApiResult<Vec<Expense>>;
    /// Registers an expense with its payments.
    async fn create_expense(&self, expense: &ExpensePayload) -> ApiResult<Expense>;
    /// Voids an expense.
    async fn void_expense(&self, id: &ExpenseId) -> ApiResult<Expense>;

    // Purchase orders
    /// Lists purchase orders.
    async fn list_purchase_orders(&self, filter: &ListFilter) -> ApiResult<Vec<PurchaseOrder>>;
    /// Creates a purchase order.
    async fn create_purchase_order(&self, order: &OrderPayload) -> ApiResult<PurchaseOrder>;
    /// Replaces an open purchase order.
    async fn update_purchase_order(
        &self,
        id: &PurchaseOrderId,
        order: &OrderPayload,
    ) -> ApiResult<PurchaseOrder>;
    /// Generates a supplier invoice from an order.
    async fn generate_invoice_from_order(
        &self,
        id: &PurchaseOrderId,
        request: &GenerateInvoiceRequest,
    ) -> ApiResult<SupplierInvoice>;
    /// Cancels an open order.
    async fn cancel_purchase_order(&self, id: &PurchaseOrderId) -> ApiResult<PurchaseOrder>;
}
