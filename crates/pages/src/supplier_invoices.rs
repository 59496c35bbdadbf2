//! Supplier invoices screen: invoices, payments and draft exchange.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesorero_client::models::{
    Account, BusinessLine, Category, CostCenter, CurrencyOption, Draft, ExchangeRequest,
    InvoicePayload, NewProvider, Provider, SupplierInvoice, VoidRequest,
};
use tesorero_core::document::{
    LineItem, PriceBasis, TaxRate, Totals, calculate_totals_with_rate, validate_line_items,
    validate_positive_total,
};
use tesorero_core::schedule::{ScheduleParams, SchedulePreview};
use tesorero_core::select::{FilterableSelect, SelectEffect};
use tesorero_core::workflow::DocumentWorkflow;
use tesorero_shared::types::{Currency, DraftId, InvoiceId, ListFilter, ProviderId};
use tracing::info;

use crate::context::PageContext;
use crate::error::{PageError, PageResult};
use crate::forms::{Editor, FormMode, PaymentForm, remove_row, replace_row};
use crate::guard::SubmitGuard;
use crate::report::{notify_outcome, report_failure};
use crate::selects;

/// Create/edit invoice form. Totals are derived from the lines on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceForm {
    /// Supplier.
    pub provider_id: Option<ProviderId>,
    /// Invoice currency.
    pub currency: Currency,
    /// Document series (`F001`).
    pub series: String,
    /// Document number.
    pub number: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Whether line amounts include tax.
    pub basis: PriceBasis,
    lines: Vec<LineItem>,
    tax_rate: TaxRate,
}

impl InvoiceForm {
    /// Empty form with one blank line.
    #[must_use]
    pub fn new(issue_date: NaiveDate, tax_rate: TaxRate) -> Self {
        Self {
            provider_id: None,
            currency: Currency::default(),
            series: String::new(),
            number: String::new(),
            issue_date,
            due_date: None,
            basis: PriceBasis::default(),
            lines: vec![LineItem::default()],
            tax_rate,
        }
    }

    /// Form prefilled from an existing invoice.
    #[must_use]
    pub fn from_invoice(invoice: &SupplierInvoice, tax_rate: TaxRate) -> Self {
        Self {
            provider_id: Some(invoice.provider_id.clone()),
            currency: invoice.currency,
            series: invoice.series.clone(),
            number: invoice.number.clone(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            basis: invoice.basis,
            lines: invoice.lines.clone(),
            tax_rate,
        }
    }

    /// Current lines.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineItem::default());
        self.lines.len() - 1
    }

    /// Removes line `index`; `false` when out of range.
    pub fn remove_line(&mut self, index: usize) -> bool {
        remove_row(&mut self.lines, index)
    }

    /// Replaces line `index`; `false` when out of range.
    pub fn update_line(&mut self, index: usize, line: LineItem) -> bool {
        replace_row(&mut self.lines, index, line)
    }

    /// Maps the "amounts include tax" checkbox.
    pub fn set_includes_tax(&mut self, includes_tax: bool) {
        self.basis = PriceBasis::from_includes_tax(includes_tax);
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
    pub fn validate(&self) -> PageResult<InvoicePayload> {
        let provider_id = self
            .provider_id
            .clone()
            .ok_or_else(|| PageError::validation("Select the supplier"))?;
        let number = self.number.trim();
        if number.is_empty() {
            return Err(PageError::validation("Invoice number is required"));
        }
        validate_line_items(&self.lines)?;
        let totals = self.totals();
        validate_positive_total(&totals)?;
        if self.due_date.is_some_and(|due_date| due_date < self.issue_date) {
            return Err(PageError::validation("Due date cannot be before the issue date"));
        }
        Ok(InvoicePayload {
            provider_id,
            currency: self.currency,
            series: self.series.trim().to_uppercase(),
            number: number.to_string(),
            issue_date: self.issue_date,
            due_date: self.due_date,
            basis: self.basis,
            lines: self.lines.clone(),
            totals,
        })
    }
}

/// Draft exchange modal: an editable schedule and the amount it must cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeModal {
    /// Invoice being exchanged.
    pub invoice_id: InvoiceId,
    /// Amount the drafts must add up to.
    pub required: Decimal,
    /// Editable schedule.
    pub preview: SchedulePreview,
}

impl ExchangeModal {
    /// `required - preview total`; zero when balanced.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.preview.difference(self.required)
    }
}

type InvoiceEditor = Editor<InvoiceId, InvoiceForm>;

/// Supplier invoice list, editor, payment and exchange modals.
pub struct SupplierInvoicesPage {
    ctx: PageContext,
    guard: SubmitGuard,
    filter: ListFilter,
    invoices: Vec<SupplierInvoice>,
    providers: Vec<Provider>,
    currencies: Vec<CurrencyOption>,
    categories: Vec<Category>,
    accounts: Vec<Account>,
    business_lines: Vec<BusinessLine>,
    cost_centers: Vec<CostCenter>,
    editor: Option<InvoiceEditor>,
    exchange: Option<ExchangeModal>,
    drafts: Vec<Draft>,
}

impl SupplierInvoicesPage {
    /// Creates an empty page; call [`SupplierInvoicesPage::load`] to fill it.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: SubmitGuard::new(),
            filter: ListFilter::new(),
            invoices: Vec::new(),
            providers: Vec::new(),
            currencies: Vec::new(),
            categories: Vec::new(),
            accounts: Vec::new(),
            business_lines: Vec::new(),
            cost_centers: Vec::new(),
            editor: None,
            exchange: None,
            drafts: Vec::new(),
        }
    }

    /// Listed invoices.
    #[must_use]
    pub fn invoices(&self) -> &[SupplierInvoice] {
        &self.invoices
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

    /// Expense categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Payment accounts.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Business lines.
    #[must_use]
    pub fn business_lines(&self) -> &[BusinessLine] {
        &self.business_lines
    }

    /// Cost centers.
    #[must_use]
    pub fn cost_centers(&self) -> &[CostCenter] {
        &self.cost_centers
    }

    /// Current list filter.
    #[must_use]
    pub const fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Open editor, if any.
    #[must_use]
    pub const fn editor(&self) -> Option<&InvoiceEditor> {
        self.editor.as_ref()
    }

    /// Mutable access to the open form.
    pub fn form_mut(&mut self) -> Option<&mut InvoiceForm> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    /// Open exchange modal, if any.
    #[must_use]
    pub const fn exchange(&self) -> Option<&ExchangeModal> {
        self.exchange.as_ref()
    }

    /// Mutable access to the exchange modal.
    pub fn exchange_mut(&mut self) -> Option<&mut ExchangeModal> {
        self.exchange.as_mut()
    }

    /// Drafts fetched by the last [`SupplierInvoicesPage::drafts`] call.
    #[must_use]
    pub fn loaded_drafts(&self) -> &[Draft] {
        &self.drafts
    }

    /// The page's submit guard.
    #[must_use]
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    /// Supplier select for the open form, with create-new.
    #[must_use]
    pub fn provider_select(&self) -> FilterableSelect<Provider> {
        let value = self
            .editor
            .as_ref()
            .and_then(|editor| editor.form.provider_id.as_ref());
        selects::provider_select(&self.providers, value, self.ctx.focus_delay())
    }

    /// Category cell select for line `index` of the open form.
    #[must_use]
    pub fn category_select(&self, index: usize) -> FilterableSelect<Category> {
        let value = self
            .editor
            .as_ref()
            .and_then(|editor| editor.form.lines.get(index))
            .and_then(|line| line.category_id.as_ref());
        selects::category_cell_select(&self.categories, value, self.ctx.focus_delay())
    }

    /// Account select for a payment form.
    #[must_use]
    pub fn account_select(&self, form: &PaymentForm) -> FilterableSelect<Account> {
        selects::account_select(&self.accounts, form.account_id.as_ref(), self.ctx.focus_delay())
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
            api.list_categories(),
            api.list_accounts(),
            api.list_business_lines(),
            api.list_cost_centers(),
        );
        match loaded {
            Ok((providers, currencies, categories, accounts, business_lines, cost_centers)) => {
                self.providers = providers;
                self.currencies = currencies;
                self.categories = categories;
                self.accounts = accounts;
                self.business_lines = business_lines;
                self.cost_centers = cost_centers;
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "load_invoices", &err);
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
            report_failure(self.ctx.notifier.as_ref(), "filter_invoices", &err);
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
        match self.ctx.api.list_invoices(&self.filter).await {
            Ok(invoices) => {
                self.invoices = invoices;
                Ok(())
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "list_invoices", &err);
                Err(err)
            }
        }
    }

    /// Opens an empty create form dated today.
    pub fn open_create(&mut self) {
        let form = InvoiceForm::new(self.ctx.today(), self.ctx.tax_rate);
        self.editor = Some(Editor::create(form));
    }

    /// Opens the edit form of an editable invoice.
    ///
    /// # Errors
    ///
    /// Rejects invoices that are paid, exchanged, voided or carry payments.
    pub fn open_edit(&mut self, id: &InvoiceId) -> PageResult<()> {
        let opened = self.find(id).and_then(|invoice| {
            if invoice.is_editable() {
                Ok(InvoiceForm::from_invoice(invoice, self.ctx.tax_rate))
            } else {
                Err(PageError::validation(format!(
                    "Invoice {} can no longer be edited",
                    invoice.number
                )))
            }
        });
        match opened {
            Ok(form) => {
                self.editor = Some(Editor::edit(id.clone(), form));
                Ok(())
            }
            Err(err) => {
                report_failure(self.ctx.notifier.as_ref(), "edit_invoice", &err);
                Err(err)
            }
        }
    }

    /// Closes the editor, dropping the form.
    pub fn close_modal(&mut self) {
        self.editor = None;
    }

    /// Creates or updates the invoice in the open editor.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error; the editor stays open.
    pub async fn submit(&mut self) -> PageResult<SupplierInvoice> {
        let result = self.save().await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "save_invoice",
            "Invoice saved",
            result,
        );
        if result.is_ok() {
            self.editor = None;
            let _ = self.reload().await;
        }
        result
    }

    async fn save(&self) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let editor = self
            .editor
            .as_ref()
            .ok_or_else(|| PageError::validation("No invoice form is open"))?;
        let payload = editor.form.validate()?;
        match &editor.mode {
            FormMode::Create => {
                let created = self.ctx.api.create_invoice(&payload).await?;
                info!(invoice_id = %created.id, total = %created.total, "Invoice created");
                Ok(created)
            }
            FormMode::Edit(id) => {
                let current = self.find(id)?;
                if !current.is_editable() {
                    return Err(PageError::validation("Invoice can no longer be edited"));
                }
                let updated = self.ctx.api.update_invoice(id, &payload).await?;
                info!(invoice_id = %updated.id, total = %updated.total, "Invoice updated");
                Ok(updated)
            }
        }
    }

    /// Registers a payment against invoice `id`.
    ///
    /// # Errors
    ///
    /// Rejects non-payable invoices, amounts over the balance and a missing
    /// account before calling the backend.
    pub async fn pay(&mut self, id: &InvoiceId, form: &PaymentForm) -> PageResult<SupplierInvoice> {
        let result = self.send_payment(id, form).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "pay_invoice",
            "Payment registered",
            result,
        );
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_payment(&self, id: &InvoiceId, form: &PaymentForm) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let invoice = self.find(id)?;
        let request = form.to_request()?;
        DocumentWorkflow::pay_invoice(invoice.status, invoice.balance, request.amount)?;
        let paid = self.ctx.api.pay_invoice(id, &request).await?;
        info!(
            invoice_id = %paid.id,
            amount = %request.amount,
            status = %paid.status,
            "Invoice payment registered"
        );
        Ok(paid)
    }

    /// Voids a pending invoice.
    ///
    /// # Errors
    ///
    /// Rejects a blank reason and non-pending invoices before calling the
    /// backend.
    pub async fn void(&mut self, id: &InvoiceId, reason: &str) -> PageResult<SupplierInvoice> {
        let result = self.send_void(id, reason).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "void_invoice",
            "Invoice voided",
            result,
        );
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_void(&self, id: &InvoiceId, reason: &str) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let invoice = self.find(id)?;
        DocumentWorkflow::void_invoice(invoice.status, reason)?;
        let request = VoidRequest {
            reason: reason.trim().to_string(),
        };
        let voided = self.ctx.api.void_invoice(id, &request).await?;
        info!(invoice_id = %voided.id, "Invoice voided");
        Ok(voided)
    }

    /// Opens the exchange modal with a schedule over the invoice balance.
    ///
    /// The schedule starts at the issue date with the configured count and
    /// interval.
    ///
    /// # Errors
    ///
    /// Rejects invoices that cannot be exchanged.
    pub fn open_exchange(&mut self, id: &InvoiceId) -> PageResult<()> {
        let opened = self.find(id).and_then(|invoice| {
            DocumentWorkflow::exchange(invoice.status, invoice.balance)?;
            let preview = SchedulePreview::new(ScheduleParams {
                balance: invoice.balance,
                count: self.ctx.ui.default_draft_count,
                interval_days: self.ctx.ui.default_draft_interval_days,
                start_date: invoice.issue_date,
            })?;
            Ok(ExchangeModal {
                invoice_id: invoice.id.clone(),
                required: invoice.exchange_target(),
                preview,
            })
        });
        match opened {
            Ok(modal) => {
                self.exchange = Some(modal);
                Ok(())
            }
            Err(err) => {
                report_failure(self.ctx.notifier.as_ref(), "open_exchange", &err);
                Err(err)
            }
        }
    }

    /// Closes the exchange modal, dropping the preview.
    pub fn close_exchange(&mut self) {
        self.exchange = None;
    }

    /// Sends the previewed drafts.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive draft or drafts that miss the required amount
    /// by 0.01 or more; the modal stays open.
    pub async fn commit_exchange(&mut self) -> PageResult<SupplierInvoice> {
        let result = self.send_exchange().await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "exchange_invoice",
            "Invoice exchanged for drafts",
            result,
        );
        if result.is_ok() {
            self.exchange = None;
            let _ = self.reload().await;
        }
        result
    }

    async fn send_exchange(&self) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let modal = self
            .exchange
            .as_ref()
            .ok_or_else(|| PageError::validation("No exchange is open"))?;
        modal.preview.validate_commit(modal.required)?;
        let request = ExchangeRequest {
            drafts: modal.preview.drafts().to_vec(),
        };
        let exchanged = self.ctx.api.exchange_invoice(&modal.invoice_id, &request).await?;
        info!(
            invoice_id = %exchanged.id,
            drafts = request.drafts.len(),
            "Invoice exchanged"
        );
        Ok(exchanged)
    }

    /// Undoes an exchange whose drafts have no payments.
    ///
    /// # Errors
    ///
    /// Rejects non-exchanged invoices and invoices with paid drafts; the
    /// drafts are fetched first to check.
    pub async fn revert_exchange(&mut self, id: &InvoiceId) -> PageResult<SupplierInvoice> {
        let result = self.send_revert(id).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "revert_exchange",
            "Exchange reverted",
            result,
        );
        if result.is_ok() {
            self.drafts.clear();
            let _ = self.reload().await;
        }
        result
    }

    async fn send_revert(&self, id: &InvoiceId) -> PageResult<SupplierInvoice> {
        let _ticket = self.guard.try_begin()?;
        let status = self.find(id)?.status;
        let drafts = self.ctx.api.list_drafts(id).await?;
        let snapshots: Vec<_> = drafts.iter().map(Draft::snapshot).collect();
        DocumentWorkflow::revert_exchange(status, &snapshots)?;
        let reverted = self.ctx.api.revert_exchange(id).await?;
        info!(invoice_id = %reverted.id, removed = drafts.len(), "Exchange reverted");
        Ok(reverted)
    }

    /// Fetches the drafts of invoice `id`.
    ///
    /// # Errors
    ///
    /// Returns the failed request; previously loaded drafts are kept.
    pub async fn drafts(&mut self, id: &InvoiceId) -> PageResult<&[Draft]> {
        match self.ctx.api.list_drafts(id).await {
            Ok(drafts) => {
                self.drafts = drafts;
                Ok(&self.drafts)
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "list_drafts", &err);
                Err(err)
            }
        }
    }

    /// Registers a payment against a loaded draft.
    ///
    /// # Errors
    ///
    /// Rejects paid drafts, amounts over the draft balance and a missing
    /// account before calling the backend.
    pub async fn pay_draft(&mut self, id: &DraftId, form: &PaymentForm) -> PageResult<Draft> {
        let result = self.send_draft_payment(id, form).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "pay_draft",
            "Draft payment registered",
            result,
        );
        if let Ok(draft) = &result {
            let invoice_id = draft.invoice_id.clone();
            let _ = self.drafts(&invoice_id).await;
            let _ = self.reload().await;
        }
        result
    }

    async fn send_draft_payment(&self, id: &DraftId, form: &PaymentForm) -> PageResult<Draft> {
        let _ticket = self.guard.try_begin()?;
        let draft = self
            .drafts
            .iter()
            .find(|d| d.id.loosely_eq(id))
            .ok_or_else(|| PageError::validation(format!("Draft {id} is not loaded")))?;
        let request = form.to_request()?;
        DocumentWorkflow::pay_draft(draft.status, draft.balance(), request.amount)?;
        let paid = self.ctx.api.pay_draft(id, &request).await?;
        info!(
            draft_id = %paid.id,
            invoice_id = %paid.invoice_id,
            amount = %request.amount,
            "Draft payment registered"
        );
        Ok(paid)
    }

    /// Creates a supplier from the select's filter text and selects it in
    /// the open form.
    ///
    /// # Errors
    ///
    /// Rejects a blank name before calling the backend.
    pub async fn create_provider(&mut self, name: &str) -> PageResult<Provider> {
        let result = self.send_provider(name).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "create_provider",
            "Supplier created",
            result,
        );
        if let Ok(provider) = &result {
            self.providers.push(provider.clone());
            if let Some(form) = self.form_mut() {
                form.provider_id = Some(provider.id.clone());
            }
        }
        result
    }

    async fn send_provider(&self, name: &str) -> PageResult<Provider> {
        let _ticket = self.guard.try_begin()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(PageError::validation("Type the supplier name first"));
        }
        let created = self
            .ctx
            .api
            .create_provider(&NewProvider {
                name: name.to_string(),
            })
            .await?;
        info!(provider_id = %created.id, "Supplier created");
        Ok(created)
    }

    /// Applies an effect of [`SupplierInvoicesPage::provider_select`].
    ///
    /// # Errors
    ///
    /// Propagates a failed create-new.
    pub async fn apply_provider_effect(&mut self, effect: SelectEffect) -> PageResult<()> {
        match effect {
            SelectEffect::Changed(value) => {
                if let Some(form) = self.form_mut() {
                    form.provider_id = Some(ProviderId::from(value));
                }
            }
            SelectEffect::Cleared => {
                if let Some(form) = self.form_mut() {
                    form.provider_id = None;
                }
            }
            SelectEffect::CreateNew(name) => {
                self.create_provider(&name).await?;
            }
            SelectEffect::FocusFilter { .. } | SelectEffect::StopPropagation => {}
        }
        Ok(())
    }

    fn find(&self, id: &InvoiceId) -> PageResult<&SupplierInvoice> {
        self.invoices
            .iter()
            .find(|i| i.id.loosely_eq(id))
            .ok_or_else(|| PageError::validation(format!("Invoice {id} is not in the list")))
    }
}
