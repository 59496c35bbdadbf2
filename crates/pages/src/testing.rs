//! In-memory backend for controller tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tesorero_client::models::{
    Account, Advance, BusinessLine, Category, CostCenter, CurrencyOption, Draft, ExchangeRequest,
    Expense, ExpensePayload, GenerateInvoiceRequest, InventoryItem, InvoicePayload, NewAdvance,
    NewProvider, OrderPayload, PaymentRequest, Provider, PurchaseOrder, SupplierInvoice,
    VoidRequest,
};
use tesorero_client::{ApiError, ApiResult, BackofficeApi};
use tesorero_core::document::{LineItem, PriceBasis, TaxRate, calculate_totals_with_rate};
use tesorero_core::workflow::{
    AdvanceStatus, DocumentWorkflow, DraftStatus, ExpenseStatus, InvoiceStatus, OrderStatus,
};
use tesorero_shared::types::{
    AccountId, AdvanceId, ArticleId, BusinessLineId, CategoryId, CostCenterId, Currency,
    CurrencyId, DraftId, ExpenseId, InvoiceId, ListFilter, ProviderId, PurchaseOrderId,
};

use crate::context::PageContext;
use crate::notify::RecordingNotifier;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Backend state. Tests seed and inspect it directly.
#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub providers: Vec<Provider>,
    pub currencies: Vec<CurrencyOption>,
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
    pub business_lines: Vec<BusinessLine>,
    pub cost_centers: Vec<CostCenter>,
    pub inventory_items: Vec<InventoryItem>,
    pub advances: Vec<Advance>,
    pub invoices: Vec<SupplierInvoice>,
    pub drafts: Vec<Draft>,
    pub expenses: Vec<Expense>,
    pub orders: Vec<PurchaseOrder>,
    pub calls: Vec<&'static str>,
    pub fail_next: Option<ApiError>,
    pub last_filter: Option<ListFilter>,
    pub last_payment: Option<PaymentRequest>,
    next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

fn not_found(what: &str) -> ApiError {
    ApiError::Rejected {
        status: 404,
        detail: format!("{what} not found"),
    }
}

fn rejected(detail: impl ToString) -> ApiError {
    ApiError::Rejected {
        status: 400,
        detail: detail.to_string(),
    }
}

impl FakeApi {
    /// A backend with reference data and one document of each kind.
    pub fn seeded() -> Self {
        let api = Self::default();
        {
            let mut state = api.state();
            state.next_id = 100;
            state.providers = vec![
                Provider {
                    id: ProviderId::from(1),
                    name: "Ferretería Lima".to_string(),
                    document_number: Some("20100000001".to_string()),
                },
                Provider {
                    id: ProviderId::from("5"),
                    name: "Distribuidora Norte".to_string(),
                    document_number: None,
                },
            ];
            state.currencies = vec![
                CurrencyOption {
                    id: CurrencyId::from(1),
                    code: Currency::Pen,
                    name: "Sol".to_string(),
                },
                CurrencyOption {
                    id: CurrencyId::from(2),
                    code: Currency::Usd,
                    name: "Dólar".to_string(),
                },
            ];
            state.categories = vec![Category {
                id: CategoryId::from(1),
                name: "Útiles de oficina".to_string(),
            }];
            state.accounts = vec![Account {
                id: AccountId::from(1),
                name: "BCP Soles".to_string(),
                currency: Some(Currency::Pen),
            }];
            state.business_lines = vec![BusinessLine {
                id: BusinessLineId::from(1),
                name: "Retail".to_string(),
            }];
            state.cost_centers = vec![CostCenter {
                id: CostCenterId::from(1),
                name: "Administración".to_string(),
            }];
            state.inventory_items = vec![InventoryItem {
                id: ArticleId::from(1),
                name: "Papel bond A4".to_string(),
                unit_price: dec!(25.50),
                unit: Some("millar".to_string()),
            }];
            state.advances = vec![Advance {
                id: AdvanceId::from(1),
                beneficiary_id: ProviderId::from(1),
                beneficiary_name: "Ferretería Lima".to_string(),
                currency: Currency::Pen,
                amount: dec!(500.00),
                issue_date: date(2024, 1, 5),
                description: "Viáticos".to_string(),
                status: AdvanceStatus::Pending,
            }];
            state.invoices = vec![
                invoice(10, dec!(1000.00), dec!(1000.00), InvoiceStatus::Pending),
                invoice(11, dec!(1000.00), dec!(600.00), InvoiceStatus::Partial),
            ];
            state.expenses = vec![Expense {
                id: ExpenseId::from(20),
                description: "Taxi".to_string(),
                currency: Currency::Pen,
                expense_date: date(2024, 1, 8),
                basis: PriceBasis::TaxIncluded,
                lines: Vec::new(),
                payments: Vec::new(),
                total: dec!(30.00),
                status: ExpenseStatus::Registered,
            }];
            state.orders = vec![PurchaseOrder {
                id: PurchaseOrderId::from(30),
                provider_id: ProviderId::from(1),
                provider_name: "Ferretería Lima".to_string(),
                currency: Currency::Pen,
                order_date: date(2024, 1, 10),
                expected_date: None,
                basis: PriceBasis::TaxIncluded,
                lines: Vec::new(),
                notes: String::new(),
                total: dec!(255.00),
                status: OrderStatus::Open,
                invoice_id: None,
            }];
        }
        api
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next call fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.state().fail_next = Some(err);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == call).count()
    }

    fn enter(&self, call: &'static str) -> ApiResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn invoice(id: i64, total: Decimal, balance: Decimal, status: InvoiceStatus) -> SupplierInvoice {
    SupplierInvoice {
        id: InvoiceId::from(id),
        provider_id: ProviderId::from(1),
        provider_name: "Ferretería Lima".to_string(),
        currency: Currency::Pen,
        series: "F001".to_string(),
        number: format!("{id:06}"),
        issue_date: date(2024, 1, 1),
        due_date: Some(date(2024, 1, 31)),
        basis: PriceBasis::TaxIncluded,
        lines: vec![LineItem::new(CategoryId::from(1), total)],
        subtotal: dec!(847.46),
        tax: dec!(152.54),
        total,
        balance,
        status,
    }
}

fn find<'a, T, F>(items: &'a mut [T], what: &str, pred: F) -> ApiResult<&'a mut T>
where
    F: Fn(&T) -> bool,
{
    items.iter_mut().find(|item| pred(item)).ok_or_else(|| not_found(what))
}

/// Test fixture: seeded backend, recorder and a context over both.
pub(crate) struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub ctx: PageContext,
}

impl Harness {
    pub fn new() -> Self {
        let api = Arc::new(FakeApi::seeded());
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = PageContext::new(api.clone(), notifier.clone());
        Self { api, notifier, ctx }
    }

    pub fn last_error(&self) -> Option<String> {
        match self.notifier.last() {
            Some(crate::notify::Notification::Error(msg)) => Some(msg),
            _ => None,
        }
    }
}

#[async_trait]
impl BackofficeApi for FakeApi {
    async fn list_providers(&self) -> ApiResult<Vec<Provider>> {
        Ok(self.enter("list_providers")?.providers.clone())
    }

    async fn list_currencies(&self) -> ApiResult<Vec<CurrencyOption>> {
        Ok(self.enter("list_currencies")?.currencies.clone())
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.enter("list_categories")?.categories.clone())
    }

    async fn list_accounts(&self) -> ApiResult<Vec<Account>> {
        Ok(self.enter("list_accounts")?.accounts.clone())
    }

    async fn list_business_lines(&self) -> ApiResult<Vec<BusinessLine>> {
        Ok(self.enter("list_business_lines")?.business_lines.clone())
    }

    async fn list_cost_centers(&self) -> ApiResult<Vec<CostCenter>> {
        Ok(self.enter("list_cost_centers")?.cost_centers.clone())
    }

    async fn list_inventory_items(&self) -> ApiResult<Vec<InventoryItem>> {
        Ok(self.enter("list_inventory_items")?.inventory_items.clone())
    }

    async fn create_provider(&self, provider: &NewProvider) -> ApiResult<Provider> {
        let mut state = self.enter("create_provider")?;
        let created = Provider {
            id: ProviderId::from(state.next_id()),
            name: provider.name.clone(),
            document_number: None,
        };
        state.providers.push(created.clone());
        Ok(created)
    }

    async fn list_advances(&self, filter: &ListFilter) -> ApiResult<Vec<Advance>> {
        let mut state = self.enter("list_advances")?;
        state.last_filter = Some(filter.clone());
        Ok(state
            .advances
            .iter()
            .filter(|a| filter.status.as_deref().is_none_or(|s| s == a.status.as_str()))
            .cloned()
            .collect())
    }

    async fn create_advance(&self, advance: &NewAdvance) -> ApiResult<Advance> {
        let mut state = self.enter("create_advance")?;
        let created = Advance {
            id: AdvanceId::from(state.next_id()),
            beneficiary_id: advance.beneficiary_id.clone(),
            beneficiary_name: String::new(),
            currency: advance.currency,
            amount: advance.amount,
            issue_date: advance.issue_date,
            description: advance.description.clone(),
            status: AdvanceStatus::Pending,
        };
        state.advances.push(created.clone());
        Ok(created)
    }

    async fn pay_advance(&self, id: &AdvanceId, payment: &PaymentRequest) -> ApiResult<Advance> {
        let mut state = self.enter("pay_advance")?;
        state.last_payment = Some(payment.clone());
        let advance = find(&mut state.advances, "Advance", |a| a.id.loosely_eq(id))?;
        advance.status = DocumentWorkflow::pay_advance(advance.status).map_err(rejected)?;
        Ok(advance.clone())
    }

    async fn void_advance(&self, id: &AdvanceId) -> ApiResult<Advance> {
        let mut state = self.enter("void_advance")?;
        let advance = find(&mut state.advances, "Advance", |a| a.id.loosely_eq(id))?;
        advance.status = DocumentWorkflow::void_advance(advance.status).map_err(rejected)?;
        Ok(advance.clone())
    }

    async fn list_invoices(&self, filter: &ListFilter) -> ApiResult<Vec<SupplierInvoice>> {
        let mut state = self.enter("list_invoices")?;
        state.last_filter = Some(filter.clone());
        Ok(state
            .invoices
            .iter()
            .filter(|i| filter.status.as_deref().is_none_or(|s| s == i.status.as_str()))
            .cloned()
            .collect())
    }

    async fn create_invoice(&self, payload: &InvoicePayload) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("create_invoice")?;
        let id = state.next_id();
        let created = SupplierInvoice {
            id: InvoiceId::from(id),
            provider_id: payload.provider_id.clone(),
            provider_name: String::new(),
            currency: payload.currency,
            series: payload.series.clone(),
            number: payload.number.clone(),
            issue_date: payload.issue_date,
            due_date: payload.due_date,
            basis: payload.basis,
            lines: payload.lines.clone(),
            subtotal: payload.totals.subtotal(),
            tax: payload.totals.tax(),
            total: payload.totals.total(),
            balance: payload.totals.total(),
            status: InvoiceStatus::Pending,
        };
        state.invoices.push(created.clone());
        Ok(created)
    }

    async fn update_invoice(
        &self,
        id: &InvoiceId,
        payload: &InvoicePayload,
    ) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("update_invoice")?;
        let invoice = find(&mut state.invoices, "Invoice", |i| i.id.loosely_eq(id))?;
        invoice.provider_id = payload.provider_id.clone();
        invoice.currency = payload.currency;
        invoice.series = payload.series.clone();
        invoice.number = payload.number.clone();
        invoice.issue_date = payload.issue_date;
        invoice.due_date = payload.due_date;
        invoice.basis = payload.basis;
        invoice.lines = payload.lines.clone();
        invoice.subtotal = payload.totals.subtotal();
        invoice.tax = payload.totals.tax();
        invoice.total = payload.totals.total();
        invoice.balance = payload.totals.total();
        Ok(invoice.clone())
    }

    async fn pay_invoice(
        &self,
        id: &InvoiceId,
        payment: &PaymentRequest,
    ) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("pay_invoice")?;
        state.last_payment = Some(payment.clone());
        let invoice = find(&mut state.invoices, "Invoice", |i| i.id.loosely_eq(id))?;
        invoice.status =
            DocumentWorkflow::pay_invoice(invoice.status, invoice.balance, payment.amount)
                .map_err(rejected)?;
        invoice.balance = if invoice.status == InvoiceStatus::Paid {
            Decimal::ZERO
        } else {
            invoice.balance - payment.amount
        };
        Ok(invoice.clone())
    }

    async fn void_invoice(
        &self,
        id: &InvoiceId,
        request: &VoidRequest,
    ) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("void_invoice")?;
        let invoice = find(&mut state.invoices, "Invoice", |i| i.id.loosely_eq(id))?;
        invoice.status =
            DocumentWorkflow::void_invoice(invoice.status, &request.reason).map_err(rejected)?;
        Ok(invoice.clone())
    }

    async fn exchange_invoice(
        &self,
        id: &InvoiceId,
        request: &ExchangeRequest,
    ) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("exchange_invoice")?;
        let invoice = find(&mut state.invoices, "Invoice", |i| i.id.loosely_eq(id))?;
        invoice.status =
            DocumentWorkflow::exchange(invoice.status, invoice.balance).map_err(rejected)?;
        let exchanged = invoice.clone();
        for preview in &request.drafts {
            let draft_id = state.next_id();
            state.drafts.push(Draft {
                id: DraftId::from(draft_id),
                invoice_id: exchanged.id.clone(),
                sequence: preview.sequence,
                due_date: preview.due_date,
                amount: preview.amount,
                paid: Decimal::ZERO,
                status: DraftStatus::Pending,
            });
        }
        Ok(exchanged)
    }

    async fn revert_exchange(&self, id: &InvoiceId) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("revert_exchange")?;
        let snapshots: Vec<_> = state
            .drafts
            .iter()
            .filter(|d| d.invoice_id.loosely_eq(id))
            .map(Draft::snapshot)
            .collect();
        let invoice = find(&mut state.invoices, "Invoice", |i| i.id.loosely_eq(id))?;
        invoice.status =
            DocumentWorkflow::revert_exchange(invoice.status, &snapshots).map_err(rejected)?;
        let reverted = invoice.clone();
        state.drafts.retain(|d| !d.invoice_id.loosely_eq(id));
        Ok(reverted)
    }

    async fn list_drafts(&self, id: &InvoiceId) -> ApiResult<Vec<Draft>> {
        let state = self.enter("list_drafts")?;
        Ok(state
            .drafts
            .iter()
            .filter(|d| d.invoice_id.loosely_eq(id))
            .cloned()
            .collect())
    }

    async fn pay_draft(&self, id: &DraftId, payment: &PaymentRequest) -> ApiResult<Draft> {
        let mut state = self.enter("pay_draft")?;
        state.last_payment = Some(payment.clone());
        let draft = find(&mut state.drafts, "Draft", |d| d.id.loosely_eq(id))?;
        draft.status = DocumentWorkflow::pay_draft(draft.status, draft.balance(), payment.amount)
            .map_err(rejected)?;
        draft.paid += payment.amount;
        Ok(draft.clone())
    }

    async fn list_expenses(&self, filter: &ListFilter) -> ApiResult<Vec<Expense>> {
        let mut state = self.enter("list_expenses")?;
        state.last_filter = Some(filter.clone());
        Ok(state.expenses.clone())
    }

    async fn create_expense(&self, payload: &ExpensePayload) -> ApiResult<Expense> {
        let mut state = self.enter("create_expense")?;
        let created = Expense {
            id: ExpenseId::from(state.next_id()),
            description: payload.description.clone(),
            currency: payload.currency,
            expense_date: payload.expense_date,
            basis: payload.basis,
            lines: payload.lines.clone(),
            payments: payload.payments.clone(),
            total: payload.totals.total(),
            status: ExpenseStatus::Registered,
        };
        state.expenses.push(created.clone());
        Ok(created)
    }

    async fn void_expense(&self, id: &ExpenseId) -> ApiResult<Expense> {
        let mut state = self.enter("void_expense")?;
        let expense = find(&mut state.expenses, "Expense", |e| e.id.loosely_eq(id))?;
        expense.status = DocumentWorkflow::void_expense(expense.status).map_err(rejected)?;
        Ok(expense.clone())
    }

    async fn list_purchase_orders(&self, filter: &ListFilter) -> ApiResult<Vec<PurchaseOrder>> {
        let mut state = self.enter("list_purchase_orders")?;
        state.last_filter = Some(filter.clone());
        Ok(state.orders.clone())
    }

    async fn create_purchase_order(&self, payload: &OrderPayload) -> ApiResult<PurchaseOrder> {
        let mut state = self.enter("create_purchase_order")?;
        let created = PurchaseOrder {
            id: PurchaseOrderId::from(state.next_id()),
            provider_id: payload.provider_id.clone(),
            provider_name: String::new(),
            currency: payload.currency,
            order_date: payload.order_date,
            expected_date: payload.expected_date,
            basis: payload.basis,
            lines: payload.lines.clone(),
            notes: payload.notes.clone(),
            total: payload.totals.total(),
            status: OrderStatus::Open,
            invoice_id: None,
        };
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn update_purchase_order(
        &self,
        id: &PurchaseOrderId,
        payload: &OrderPayload,
    ) -> ApiResult<PurchaseOrder> {
        let mut state = self.enter("update_purchase_order")?;
        let order = find(&mut state.orders, "Purchase order", |o| o.id.loosely_eq(id))?;
        if !order.status.is_editable() {
            return Err(rejected("Only open orders can be edited"));
        }
        order.provider_id = payload.provider_id.clone();
        order.currency = payload.currency;
        order.order_date = payload.order_date;
        order.expected_date = payload.expected_date;
        order.basis = payload.basis;
        order.lines = payload.lines.clone();
        order.notes = payload.notes.clone();
        order.total = payload.totals.total();
        Ok(order.clone())
    }

    async fn generate_invoice_from_order(
        &self,
        id: &PurchaseOrderId,
        request: &GenerateInvoiceRequest,
    ) -> ApiResult<SupplierInvoice> {
        let mut state = self.enter("generate_invoice_from_order")?;
        let invoice_id = state.next_id();
        let order = find(&mut state.orders, "Purchase order", |o| o.id.loosely_eq(id))?;
        order.status =
            DocumentWorkflow::generate_invoice(order.status, &request.number).map_err(rejected)?;
        order.invoice_id = Some(InvoiceId::from(invoice_id));
        let totals = calculate_totals_with_rate(&order.lines, order.basis, TaxRate::STANDARD);
        let created = SupplierInvoice {
            id: InvoiceId::from(invoice_id),
            provider_id: order.provider_id.clone(),
            provider_name: order.provider_name.clone(),
            currency: order.currency,
            series: request.series.clone(),
            number: request.number.clone(),
            issue_date: request.issue_date,
            due_date: None,
            basis: order.basis,
            lines: Vec::new(),
            subtotal: totals.subtotal(),
            tax: totals.tax(),
            total: order.total,
            balance: order.total,
            status: InvoiceStatus::Pending,
        };
        state.invoices.push(created.clone());
        Ok(created)
    }

    async fn cancel_purchase_order(&self, id: &PurchaseOrderId) -> ApiResult<PurchaseOrder> {
        let mut state = self.enter("cancel_purchase_order")?;
        let order = find(&mut state.orders, "Purchase order", |o| o.id.loosely_eq(id))?;
        order.status = DocumentWorkflow::cancel_order(order.status).map_err(rejected)?;
        Ok(order.clone())
    }
}
