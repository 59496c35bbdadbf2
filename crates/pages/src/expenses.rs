//! Expenses screen. An expense is registered together with its payments.

use chrono::NaiveDate;
use tesorero_client::models::{
    Account, BusinessLine, Category, CostCenter, CurrencyOption, Expense, ExpensePayload,
};
use tesorero_core::document::{
    LineItem, PriceBasis, TaxRate, Totals, calculate_totals_with_rate, validate_line_items,
    validate_positive_total,
};
use tesorero_core::payment::{PaymentRow, split_evenly, validate_payments};
use tesorero_core::select::FilterableSelect;
use tesorero_core::workflow::DocumentWorkflow;
use tesorero_shared::types::{Currency, ExpenseId, ListFilter};
use tracing::info;

use crate::context::PageContext;
use crate::error::{PageError, PageResult};
use crate::forms::{remove_row, replace_row};
use crate::guard::SubmitGuard;
use crate::report::{notify_outcome, report_failure};
use crate::selects;

/// Create-expense form.
///
/// With even splitting on, every change to lines, basis or payment rows
/// overwrites the payment amounts with an equal share of the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    /// What was bought.
    pub description: String,
    /// Expense currency.
    pub currency: Currency,
    /// Date of the expense.
    pub expense_date: NaiveDate,
    basis: PriceBasis,
    lines: Vec<LineItem>,
    payments: Vec<PaymentRow>,
    split_evenly: bool,
    tax_rate: TaxRate,
}

impl ExpenseForm {
    /// Empty form with one blank line and one blank payment.
    #[must_use]
    pub fn new(expense_date: NaiveDate, tax_rate: TaxRate) -> Self {
        Self {
            description: String::new(),
            currency: Currency::default(),
            expense_date,
            basis: PriceBasis::default(),
            lines: vec![LineItem::default()],
            payments: vec![PaymentRow::default()],
            split_evenly: false,
            tax_rate,
        }
    }

    /// Current lines.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Current payment rows.
    #[must_use]
    pub fn payments(&self) -> &[PaymentRow] {
        &self.payments
    }

    /// Whether amounts include tax.
    #[must_use]
    pub const fn basis(&self) -> PriceBasis {
        self.basis
    }

    /// Whether payments are split evenly.
    #[must_use]
    pub const fn is_split_evenly(&self) -> bool {
        self.split_evenly
    }

    /// Totals of the current lines, rounded to cents.
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculate_totals_with_rate(&self.lines, self.basis, self.tax_rate).rounded()
    }

    /// Appends a blank line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineItem::default());
        self.recompute();
        self.lines.len() - 1
    }

    /// Removes line `index`; `false` when out of range.
    pub fn remove_line(&mut self, index: usize) -> bool {
        let removed = remove_row(&mut self.lines, index);
        self.recompute();
        removed
    }

    /// Replaces line `index`; `false` when out of range.
    pub fn update_line(&mut self, index: usize, line: LineItem) -> bool {
        let replaced = replace_row(&mut self.lines, index, line);
        self.recompute();
        replaced
    }

    /// Maps the "amounts include tax" checkbox.
    pub fn set_includes_tax(&mut self, includes_tax: bool) {
        self.basis = PriceBasis::from_includes_tax(includes_tax);
        self.recompute();
    }

    /// Appends a blank payment row and returns its index.
    pub fn add_payment(&mut self) -> usize {
        self.payments.push(PaymentRow::default());
        self.recompute();
        self.payments.len() - 1
    }

    /// Removes payment row `index`; `false` when out of range.
    pub fn remove_payment(&mut self, index: usize) -> bool {
        let removed = remove_row(&mut self.payments, index);
        self.recompute();
        removed
    }

    /// Replaces payment row `index`; `false` when out of range.
    ///
    /// The amount is overwritten when splitting evenly.
    pub fn update_payment(&mut self, index: usize, row: PaymentRow) -> bool {
        let replaced = replace_row(&mut self.payments, index, row);
        self.recompute();
        replaced
    }

    /// Turns even splitting on or off. Turning it on splits immediately.
    pub fn set_split_evenly(&mut self, on: bool) {
        self.split_evenly = on;
        self.recompute();
    }

    fn recompute(&mut self) {
        if self.split_evenly {
            split_evenly(self.totals().total(), &mut self.payments);
        }
    }

    /// Checks the form and builds the payload.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` with the first problem found.
    pub fn validate(&self) -> PageResult<ExpensePayload> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(PageError::validation("Description is required"));
        }
        validate_line_items(&self.lines)?;
        let totals = self.totals();
        validate_positive_total(&totals)?;
        validate_payments(&self.payments, totals.total())?;
        Ok(ExpensePayload {
            description: description.to_string(),
            currency: self.currency,
            expense_date: self.expense_date,
            basis: self.basis,
            lines: self.lines.clone(),
            payments: self.payments.clone(),
            totals,
        })
    }
}

/// Expense list and the create modal.
pub struct ExpensesPage {
    ctx: PageContext,
    guard: SubmitGuard,
    filter: ListFilter,
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    accounts: Vec<Account>,
    currencies: Vec<CurrencyOption>,
    business_lines: Vec<BusinessLine>,
    cost_centers: Vec<CostCenter>,
    form: Option<ExpenseForm>,
}

impl ExpensesPage {
    /// Creates an empty page; call [`ExpensesPage::load`] to fill it.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: SubmitGuard::new(),
            filter: ListFilter::new(),
            expenses: Vec::new(),
            categories: Vec::new(),
            accounts: Vec::new(),
            currencies: Vec::new(),
            business_lines: Vec::new(),
            cost_centers: Vec::new(),
            form: None,
        }
    }

    /// Listed expenses.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
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

    /// Currencies.
    #[must_use]
    pub fn currencies(&self) -> &[CurrencyOption] {
        &self.currencies
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

    /// Open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&ExpenseForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form.
    pub fn form_mut(&mut self) -> Option<&mut ExpenseForm> {
        self.form.as_mut()
    }

    /// The page's submit guard.
    #[must_use]
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    /// Category cell select for line `index`.
    #[must_use]
    pub fn category_select(&self, index: usize) -> FilterableSelect<Category> {
        let value = self
            .form
            .as_ref()
            .and_then(|form| form.lines.get(index))
            .and_then(|line| line.category_id.as_ref());
        selects::category_cell_select(&self.categories, value, self.ctx.focus_delay())
    }

    /// Account select for payment row `index`.
    #[must_use]
    pub fn account_select(&self, index: usize) -> FilterableSelect<Account> {
        let value = self
            .form
            .as_ref()
            .and_then(|form| form.payments.get(index))
            .and_then(|row| row.account_id.as_ref());
        selects::account_select(&self.accounts, value, self.ctx.focus_delay())
    }

    /// Loads reference data concurrently, then the list.
    ///
    /// # Errors
    ///
    /// Returns the first failed request.
    pub async fn load(&mut self) -> PageResult<()> {
        let api = &self.ctx.api;
        let loaded = tokio::try_join!(
            api.list_categories(),
            api.list_accounts(),
            api.list_currencies(),
            api.list_business_lines(),
            api.list_cost_centers(),
        );
        match loaded {
            Ok((categories, accounts, currencies, business_lines, cost_centers)) => {
                self.categories = categories;
                self.accounts = accounts;
                self.currencies = currencies;
                self.business_lines = business_lines;
                self.cost_centers = cost_centers;
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "load_expenses", &err);
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
            report_failure(self.ctx.notifier.as_ref(), "filter_expenses", &err);
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
        match self.ctx.api.list_expenses(&self.filter).await {
            Ok(expenses) => {
                self.expenses = expenses;
                Ok(())
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "list_expenses", &err);
                Err(err)
            }
        }
    }

    /// Opens an empty form dated today.
    pub fn open_create(&mut self) {
        self.form = Some(ExpenseForm::new(self.ctx.today(), self.ctx.tax_rate));
    }

    /// Closes the modal, dropping the form.
    pub fn close_modal(&mut self) {
        self.form = None;
    }

    /// Registers the open form with its payments.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error; the form stays open.
    pub async fn submit(&mut self) -> PageResult<Expense> {
        let result = self.create().await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "create_expense",
            "Expense registered",
            result,
        );
        if result.is_ok() {
            self.form = None;
            let _ = self.reload().await;
        }
        result
    }

    async fn create(&self) -> PageResult<Expense> {
        let _ticket = self.guard.try_begin()?;
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| PageError::validation("No expense form is open"))?;
        let payload = form.validate()?;
        let created = self.ctx.api.create_expense(&payload).await?;
        info!(
            expense_id = %created.id,
            total = %created.total,
            payments = payload.payments.len(),
            "Expense created"
        );
        Ok(created)
    }

    /// Voids a registered expense.
    ///
    /// # Errors
    ///
    /// Rejects unknown or already voided expenses before calling the backend.
    pub async fn void(&mut self, id: &ExpenseId) -> PageResult<Expense> {
        let result = self.send_void(id).await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "void_expense",
            "Expense voided",
            result,
        );
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_void(&self, id: &ExpenseId) -> PageResult<Expense> {
        let _ticket = self.guard.try_begin()?;
        let expense = self
            .expenses
            .iter()
            .find(|e| e.id.loosely_eq(id))
            .ok_or_else(|| PageError::validation(format!("Expense {id} is not in the list")))?;
        DocumentWorkflow::void_expense(expense.status)?;
        let voided = self.ctx.api.void_expense(id).await?;
        info!(expense_id = %voided.id, "Expense voided");
        Ok(voided)
    }
}
