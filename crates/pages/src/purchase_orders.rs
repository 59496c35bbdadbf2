//! Purchase orders screen.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesorero_client::models::{
    CurrencyOption, GenerateInvoiceRequest, InventoryItem, OrderPayload, Provider, PurchaseOrder,
    SupplierInvoice,
};
use tesorero_core::document::{
    ArticleLine, PriceBasis, TaxRate, Totals, calculate_totals_with_rate, validate_article_lines,
};
use tesorero_core::select::{FilterableSelect, SelectEffect};
use tesorero_core::workflow::DocumentWorkflow;
use tesorero_shared::types::{ArticleId, Currency, ListFilter, ProviderId, PurchaseOrderId};
use tracing::info;

use crate::context::PageContext;
use crate::error::{PageError, PageResult};
use crate::forms::{Editor, FormMode, remove_row, replace_row};
use crate::guard::SubmitGuard;
use crate::report::{notify_outcome, report_failure};
use crate::selects;

/// Create/edit purchase order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    /// Supplier.
    pub provider_id: Option<ProviderId>,
    /// Order currency.
    pub currency: Currency,
    /// Order date.
    pub order_date: NaiveDate,
    /// Expected delivery.
    pub expected_date: Option<NaiveDate>,
    /// Whether unit prices include tax.
    pub basis: PriceBasis,
    /// Free-text notes.
    pub notes: String,
    lines: Vec<ArticleLine>,
    tax_rate: TaxRate,
}

impl OrderForm {
    /// Empty form with one blank line.
    #[must_use]
    pub fn new(order_date: NaiveDate, tax_rate: TaxRate) -> Self {
        Self {
            provider_id: None,
            currency: Currency::default(),
            order_date,
            expected_date: None,
            basis: PriceBasis::default(),
            notes: String::new(),
            lines: vec![ArticleLine::default()],
            tax_rate,
        }
    }

    /// Form prefilled from an existing order.
    #[must_use]
    pub fn from_order(order: &PurchaseOrder, tax_rate: TaxRate) -> Self {
        Self {
            provider_id: Some(order.provider_id.clone()),
            currency: order.currency,
            order_date: order.order_date,
            expected_date: order.expected_date,
            basis: order.basis,
            notes: order.notes.clone(),
            lines: order.lines.clone(),
            tax_rate,
        }
    }

    /// Current lines.
    #[must_use]
    pub fn lines(&self) -> &[ArticleLine] {
        &self.lines
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(ArticleLine::default());
        self.lines.len() - 1
    }

    /// Removes line `index`; `false` when out of range.
    pub fn remove_line(&mut self, index: usize) -> bool {
        remove_row(&mut self.lines, index)
    }

    /// Replaces line `index`; `false` when out of range.
    pub fn update_line(&mut self, index: usize, line: ArticleLine) -> bool {
        replace_row(&mut self.lines, index, line)
    }

    /// Puts `item` on line `index`.
    ///
    /// The item's price is copied only while the line has no price yet.
    pub fn choose_article(&mut self, index: usize, item: &InventoryItem) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        line.article_id = Some(item.id.clone());
        if line.unit_price.is_zero() {
            line.unit_price = item.unit_price;
        }
        true
    }

    /// Clears the article of line `index`, keeping quantity and price.
    pub fn clear_article(&mut self, index: usize) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.article_id = None;
                true
            }
            None => false,
        }
    }

    /// Totals of the current lines, rounded to cents.
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals_with_rate(&self.lines, self.basis, self.tax_rate).rounded()
    }

    /// Checks the form and builds the payload.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` with the first problem found.
    pub fn validate(&self) -> PageResult<OrderPayload> {
        let provider_id = self
            .provider_id
            .clone()
            .ok_or_else(|| PageError::validation("Select the supplier"))?;
        validate_article_lines(&self.lines)?;
        if self
            .expected_date
            .is_some_and(|expected| expected < self.order_date)
        {
            return Err(PageError::validation(
                "Expected date cannot be before the order date",
            ));
        }
        Ok(OrderPayload {
            provider_id,
            currency: self.currency,
            order_date: self.order_date,
            expected_date: self.expected_date,
            basis: self.basis,
            lines: self.lines.clone(),
            notes: self.notes.trim().to_string(),
            totals: self.totals(),
        })
    }
}

type OrderEditor = Editor<PurchaseOrderId, OrderForm>;

/// Purchase order list and editor.
pub struct PurchaseOrdersPage {
    ctx: PageContext,
    guard: SubmitGuard,
    filter: ListFilter,
    orders: Vec<PurchaseOrder>,
    providers: Vec<Provider>,
    currencies: Vec<CurrencyOption>,
    inventory_items: Vec<InventoryItem>,
    editor: Option<OrderEditor>,
}

impl PurchaseOrdersPage {
    /// Creates an empty page; call [`PurchaseOrdersPage::load`] to fill it.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: SubmitGuard::new(),
            filter: ListFilter::new(),
            orders: Vec::new(),
            providers: Vec::new(),
            currencies: Vec::new(),
            inventory_items: Vec::new(),
            editor: None,
        }
    }

    /// Listed orders.
    #[must_use]
    pub fn orders(&self) -> &[PurchaseOrder] {
        &self.orders
    }

    /// Suppliers.
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Currencies.
    #[must_use]
    pub fn currencies(&self) -> &[CurrencyOption] {
        &self.currencies
    }

    /// Inventory items.
    #[must_use]
    pub fn inventory_items(&self) -> &[InventoryItem] {
        &self.inventory_items
    }

    /// Current list filter.
    #[must_use]
    pub const fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Open editor, if any.
    #[must_use]
    pub const fn editor(&self) -> Option<&OrderEditor> {
        self.editor.as_ref()
    }

    /// Mutable access to the open form.
    pub fn form_mut(&mut self) -> Option<&mut OrderForm> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    /// The page's submit guard.
    #[must_use]
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    /// Supplier select for the open form.
    #[must_use]
    pub fn provider_select(&self) -> FilterableSelect<Provider> {
        let value = self
            .editor
            .as_ref()
            .and_then(|editor| editor.form.provider_id.as_ref());
        selects::provider_select(&self.providers, value, self.ctx.focus_delay())
    }

    /// Article cell select for line `index`.
    #[must_use]
    pub fn article_select(&self, index: usize) -> FilterableSelect<InventoryItem> {
        let value = self
            .editor
            .as_ref()
            .and_then(|editor| editor.form.lines.get(index))
            .and_then(|line| line.article_id.as_ref());
        selects::article_cell_select(&self.inventory_items, value, self.ctx.focus_delay())
    }

    /// Applies an effect of [`PurchaseOrdersPage::article_select`] to line
    /// `index`.
    pub fn apply_article_effect(&mut self, index: usize, effect: SelectEffect) {
        match effect {
            SelectEffect::Changed(value) => {
                self.choose_article(index, &ArticleId::from(value));
            }
            SelectEffect::Cleared => {
                if let Some(form) = self.form_mut() {
                    form.clear_article(index);
                }
            }
            SelectEffect::CreateNew(_)
            | SelectEffect::FocusFilter { .. }
            | SelectEffect::StopPropagation => {}
        }
    }

    /// Puts inventory item `article_id` on line `index` of the open form.
    ///
    /// Returns `false` when the item or line is unknown.
    pub fn choose_article(&mut self, index: usize, article_id: &ArticleId) -> bool {
        let Some(item) = self
            .inventory_items
            .iter()
            .find(|item| item.id.loosely_eq(article_id))
        else {
            return false;
        };
        self.editor
            .as_mut()
            .is_some_and(|editor| editor.form.choose_article(index, item))
    }

    /// Loads reference data concurrently, then the list.
    ///
    /// # Errors
    ///
    /// Returns the first failed request.
    pub async fn load(&mut self) -> PageResult<()> {
        let api = &self.ctx.api;
        let loaded = tokio::try_join!(
            api.list_providers(),
            api.list_currencies(),
            api.list_inventory_items(),
        );
        match loaded {
            Ok((providers, currencies, inventory_items)) => {
                self.providers = providers;
                self.currencies = currencies;
                self.inventory_items = inventory_items;
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "load_orders", &err);
                return Err(err);
            }
        }
        self.reload().await
    }

    /// Applies a new filter and reloads.
    ///
    /// # Errors
    ///
    /// Rejects an inverted date range without reloading.
    pub async fn set_filter(&mut self, filter: ListFilter) -> PageResult<()> {
        if let Err(msg) = filter.validate() {
            let err = PageError::Validation(msg);
            report_failure(self.ctx.notifier.as_ref(), "filter_orders", &err);
            return Err(err);
        }
        self.filter = filter;
        self.reload().await
    }

    /// Reloads the list with the current filter.
    ///
    /// # Errors
    ///
    /// Returns the failed request; the previous list is kept.
    pub async fn reload(&mut self) -> PageResult<()> {
        match self.ctx.api.list_purchase_orders(&self.filter).await {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "list_orders", &err);
                Err(err)
            }
        }
    }

    /// Opens an empty create form dated today.
    pub fn open_create(&mut self) {
        let form = OrderForm::new(self.ctx.today(), self.ctx.tax_rate);
        self.editor = Some(Editor::create(form));
    }

    /// Opens the edit form of an open order.
    ///
    /// # Errors
    ///
    /// Rejects invoiced and cancelled orders.
    pub fn open_edit(&mut self, id: &PurchaseOrderId) -> PageResult<()> {
        let opened = self.find(id).and_then(|order| {
            if order.status.is_editable() {
                Ok(OrderForm::from_order(order, self.ctx.tax_rate))
            } else {
                Err(PageError::validation(format!(
                    "Order {id} is {} and can no longer be edited",
                    order.status
                )))
            }
        });
        match opened {
            Ok(form) => {
                self.editor = Some(Editor::edit(id.clone(), form));
                Ok(())
            }
            Err(err) => {
                report_failure(self.ctx.notifier.as_ref(), "edit_order", &err);
                Err(err)
            }
        }
    }

    /// Closes the editor, dropping the form.
    pub fn close_modal(&mut self) {
        self.editor = None;
    }

    /// Creates or updates the order in the open editor.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error; the editor stays open.
    pub async fn submit(&mut self) -> PageResult<PurchaseOrder> {
        let result = self.save().await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "save_order",
            "Purchase order saved",
            result,
        );
        if result.is_ok() {
            self.editor = None;
            let _ = self.reload().await;
        }
        result
    }

    async fn save(&self) -> PageResult<PurchaseOrder> {
        let _ticket = self.guard.try_begin()?;
        let editor = self
            .editor
            .as_ref()
            .ok_or_else(|| PageError::validation("No order form is open"))?;
        let payload = editor.form.validate()?;
        match &editor.mode {
            FormMode::Create => {
                let created = self.ctx.api.create_purchase_order(&payload).await?;
                info!(order_id = %created.id, total = %created.total, "Purchase order created");
                Ok(created)
            }
            FormMode::Edit(id) => {
                if !self.find(id)?.status.is_editable() {
                    return Err(PageError::validation("Order can no longer be edited"));
                }
                let updated = self.ctx.api.update_purchase_order(id, &payload).await?;
                info!(order_id = %updated.id, total = %updated.total, "Purchase order updated");
                Ok(updated)
            }
        }
    }

    /// Turns an open order into a supplier invoice dated today.
    ///
    /// # Errors
    ///
    /// Rejects a blank invoice number and orders that are not open.
    pub async fn generate_invoice(
        &mut self,
        id: &PurchaseOrderId,
        series: &str,
        number: &str,
    ) -> PageResult<SupplierInvoice> {
        let result = self.send_generate(id, series, number).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "generate_invoice",
            "Invoice generated from order",
            result,
        );
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_generate(
        &self,
        id: &PurchaseOrderId,
        series: &str,
        number: &str,
    ) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let order = self.find(id)?;
        DocumentWorkflow::generate_invoice(order.status, number)?;
        let request = GenerateInvoiceRequest {
            series: series.trim().to_uppercase(),
            number: number.trim().to_string(),
            issue_date: self.ctx.today(),
        };
        let invoice = self.ctx.api.generate_invoice_from_order(id, &request).await?;
        info!(order_id = %id, invoice_id = %invoice.id, "Invoice generated from order");
        Ok(invoice)
    }

    /// Cancels an open order.
    ///
    /// # Errors
    ///
    /// Rejects orders that are not open before calling the backend.
    pub async fn cancel(&mut self, id: &PurchaseOrderId) -> PageResult<PurchaseOrder> {
        let result = self.send_cancel(id).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "cancel_order",
            "Purchase order cancelled",
            result,
        );
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_cancel(&self, id: &PurchaseOrderId) -> PageResult<PurchaseOrder> {
        let _ticket = self.guard.try_begin()?;
        DocumentWorkflow::cancel_order(self.find(id)?.status)?;
        let cancelled = self.ctx.api.cancel_purchase_order(id).await?;
        info!(order_id = %cancelled.id, "Purchase order cancelled");
        Ok(cancelled)
    }

    fn find(&self, id: &PurchaseOrderId) -> PageResult<&PurchaseOrder> {
        self.orders
            .iter()
            .find(|o| o.id.loosely_eq(id))
            .ok_or_else(|| PageError::validation(format!("Order {id} is not in the list")))
    }
}
