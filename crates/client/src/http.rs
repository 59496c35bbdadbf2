//! `reqwest` implementation of [`BackofficeApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tesorero_shared::config::ApiConfig;
use tesorero_shared::types::{
    AdvanceId, DraftId, ExpenseId, InvoiceId, ListFilter, PurchaseOrderId,
};

use crate::api::BackofficeApi;
use crate::error::{ApiError, ApiResult, detail_message};
use crate::models::{
    Account, Advance, BusinessLine, Category, CostCenter, CurrencyOption, Draft, ExchangeRequest,
    Expense, ExpensePayload, GenerateInvoiceRequest, InventoryItem, InvoicePayload, NewAdvance,
    NewProvider, OrderPayload, PaymentRequest, Provider, PurchaseOrder, SupplierInvoice,
    VoidRequest,
};

/// Back-office API over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpBackofficeApi {
    client: Client,
    base_url: String,
}

impl HttpBackofficeApi {
    /// Creates a client with the configured base URL and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        Self::send(Method::GET, path, self.request(Method::GET, path)).await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, filter: &ListFilter) -> ApiResult<T> {
        let request = self.request(Method::GET, path).query(&filter.to_query());
        Self::send(Method::GET, path, request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        Self::send(Method::POST, path, request).await
    }

    /// POST without a body, for state-change endpoints (`/void`, `/cancel`).
    async fn action<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        Self::send(Method::POST, path, self.request(Method::POST, path)).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        Self::send(Method::PUT, path, request).await
    }

    async fn send<T: DeserializeOwned>(
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(%method, path, error = %e, "Backend unreachable");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%method, path, status = status.as_u16(), "Backend response");

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                tracing::error!(%method, path, error = %e, "Undecodable backend response");
                ApiError::Decode(e.to_string())
            })
        } else {
            Err(ApiError::Rejected {
                status: status.as_u16(),
                detail: detail_message(&body),
            })
        }
    }
}

#[async_trait]
impl BackofficeApi for HttpBackofficeApi {
    async fn list_providers(&self) -> ApiResult<Vec<Provider>> {
        self.get("/providers").await
    }

    async fn list_currencies(&self) -> ApiResult<Vec<CurrencyOption>> {
        self.get("/currencies").await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categories").await
    }

    async fn list_accounts(&self) -> ApiResult<Vec<Account>> {
        self.get("/accounts").await
    }

    async fn list_business_lines(&self) -> ApiResult<Vec<BusinessLine>> {
        self.get("/business-lines").await
    }

    async fn list_cost_centers(&self) -> ApiResult<Vec<CostCenter>> {
        self.get("/cost-centers").await
    }

    async fn list_inventory_items(&self) -> ApiResult<Vec<InventoryItem>> {
        self.get("/inventory-items").await
    }

    async fn create_provider(&self, provider: &NewProvider) -> ApiResult<Provider> {
        self.post("/providers", provider).await
    }

    async fn list_advances(&self, filter: &ListFilter) -> ApiResult<Vec<Advance>> {
        self.list("/advances", filter).await
    }

    async fn create_advance(&self, advance: &NewAdvance) -> ApiResult<Advance> {
        self.post("/advances", advance).await
    }

    async fn pay_advance(&self, id: &AdvanceId, payment: &PaymentRequest) -> ApiResult<Advance> {
        self.post(&format!("/advances/{id}/pay"), payment).await
    }

    async fn void_advance(&self, id: &AdvanceId) -> ApiResult<Advance> {
        self.action(&format!("/advances/{id}/void")).await
    }

    async fn list_invoices(&self, filter: &ListFilter) -> ApiResult<Vec<SupplierInvoice>> {
        self.list("/supplier-invoices", filter).await
    }

    async fn create_invoice(&self, invoice: &InvoicePayload) -> ApiResult<SupplierInvoice> {
        self.post("/supplier-invoices", invoice).await
    }

    async fn update_invoice(
        &self,
        id: &InvoiceId,
        invoice: &InvoicePayload,
    ) -> ApiResult<SupplierInvoice> {
        self.put(&format!("/supplier-invoices/{id}"), invoice).await
    }

    async fn pay_invoice(
        &self,
        id: &InvoiceId,
        payment: &PaymentRequest,
    ) -> ApiResult<SupplierInvoice> {
        self.post(&format!("/supplier-invoices/{id}/pay"), payment).await
    }

    async fn void_invoice(
        &self,
        id: &InvoiceId,
        request: &VoidRequest,
    ) -> ApiResult<SupplierInvoice> {
        self.post(&format!("/supplier-invoices/{id}/void"), request).await
    }

    async fn exchange_invoice(
        &self,
        id: &InvoiceId,
        request: &ExchangeRequest,
    ) -> ApiResult<SupplierInvoice> {
        self.post(&format!("/supplier-invoices/{id}/exchange"), request).await
    }

    async fn revert_exchange(&self, id: &InvoiceId) -> ApiResult<SupplierInvoice> {
        self.action(&format!("/supplier-invoices/{id}/revert-exchange")).await
    }

    async fn list_drafts(&self, id: &InvoiceId) -> ApiResult<Vec<Draft>> {
        self.get(&format!("/supplier-invoices/{id}/drafts")).await
    }

    async fn pay_draft(&self, id: &DraftId, payment: &PaymentRequest) -> ApiResult<Draft> {
        self.post(&format!("/drafts/{id}/pay"), payment).await
    }

    async fn list_expenses(&self, filter: &ListFilter) -> ApiResult<Vec<Expense>> {
        self.list("/expenses", filter).await
    }

    async fn create_expense(&self, expense: &ExpensePayload) -> ApiResult<Expense> {
        self.post("/expenses", expense).await
    }

    async fn void_expense(&self, id: &ExpenseId) -> ApiResult<Expense> {
        self.action(&format!("/expenses/{id}/void")).await
    }

    async fn list_purchase_orders(&self, filter: &ListFilter) -> ApiResult<Vec<PurchaseOrder>> {
        self.list("/purchase-orders", filter).await
    }

    async fn create_purchase_order(&self, order: &OrderPayload) -> ApiResult<PurchaseOrder> {
        self.post("/purchase-orders", order).await
    }

    async fn update_purchase_order(
        &self,
        id: &PurchaseOrderId,
        order: &OrderPayload,
    ) -> ApiResult<PurchaseOrder> {
        self.put(&format!("/purchase-orders/{id}"), order).await
    }

    async fn generate_invoice_from_order(
        &self,
        id: &PurchaseOrderId,
        request: &GenerateInvoiceRequest,
    ) -> ApiResult<SupplierInvoice> {
        self.post(&format!("/purchase-orders/{id}/generate-invoice"), request).await
    }

    async fn cancel_purchase_order(&self, id: &PurchaseOrderId) -> ApiResult<PurchaseOrder> {
        self.action(&format!("/purchase-orders/{id}/cancel")).await
    }
}
