//! Employee advances screen.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesorero_client::models::{Account, Advance, CurrencyOption, NewAdvance, Provider};
use tesorero_core::select::FilterableSelect;
use tesorero_core::workflow::DocumentWorkflow;
use tesorero_shared::types::{AdvanceId, Currency, ListFilter, ProviderId};
use tracing::info;

use crate::context::PageContext;
use crate::error::{PageError, PageResult};
use crate::forms::PaymentForm;
use crate::guard::SubmitGuard;
use crate::report::{notify_outcome, report_failure};
use crate::selects;

/// Longest accepted advance description.
pub const MAX_DESCRIPTION_LEN: usize = 250;

/// Create-advance form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceForm {
    /// Employee or provider receiving the money.
    pub beneficiary_id: Option<ProviderId>,
    /// Currency of the advance.
    pub currency: Currency,
    /// Advanced amount.
    pub amount: Decimal,
    /// Date of issue.
    pub issue_date: NaiveDate,
    /// What the money is for.
    pub description: String,
}

impl AdvanceForm {
    /// Empty form dated `issue_date`.
    #[must_use]
    pub fn new(issue_date: NaiveDate) -> Self {
        Self {
            beneficiary_id: None,
            currency: Currency::default(),
            amount: Decimal::ZERO,
            issue_date,
            description: String::new(),
        }
    }

    /// Checks the form and builds the payload.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` for a missing beneficiary, a
    /// non-positive amount or a description over 250 characters.
    pub fn validate(&self) -> PageResult<NewAdvance> {
        let beneficiary_id = self
            .beneficiary_id
            .clone()
            .ok_or_else(|| PageError::validation("Select the beneficiary"))?;
        if self.amount <= Decimal::ZERO {
            return Err(PageError::validation("Amount must be greater than zero"));
        }
        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(PageError::validation(format!(
                "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        Ok(NewAdvance {
            beneficiary_id,
            currency: self.currency,
            amount: self.amount,
            issue_date: self.issue_date,
            description: description.to_string(),
        })
    }
}

/// Advances list, its filter and the create modal.
pub struct AdvancesPage {
    ctx: PageContext,
    guard: SubmitGuard,
    filter: ListFilter,
    advances: Vec<Advance>,
    providers: Vec<Provider>,
    currencies: Vec<CurrencyOption>,
    accounts: Vec<Account>,
    form: Option<AdvanceForm>,
}

impl AdvancesPage {
    /// Creates an empty page; call [`AdvancesPage::load`] to fill it.
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            guard: SubmitGuard::new(),
            filter: ListFilter::new(),
            advances: Vec::new(),
            providers: Vec::new(),
            currencies: Vec::new(),
            accounts: Vec::new(),
            form: None,
        }
    }

    /// Listed advances.
    #[must_use]
    pub fn advances(&self) -> &[Advance] {
        &self.advances
    }

    /// Beneficiaries (providers and employees).
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Currencies.
    #[must_use]
    pub fn currencies(&self) -> &[CurrencyOption] {
        &self.currencies
    }

    /// Accounts payments can leave from.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Current list filter.
    #[must_use]
    pub const fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Open create form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&AdvanceForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form.
    pub fn form_mut(&mut self) -> Option<&mut AdvanceForm> {
        self.form.as_mut()
    }

    /// The page's submit guard.
    #[must_use]
    pub fn submit_guard(&self) -> SubmitGuard {
        self.guard.clone()
    }

    /// Beneficiary select for the open form.
    #[must_use]
    pub fn beneficiary_select(&self) -> FilterableSelect<Provider> {
        let value = self.form.as_ref().and_then(|f| f.beneficiary_id.as_ref());
        selects::provider_select(&self.providers, value, self.ctx.focus_delay())
    }

    /// Loads reference data concurrently, then the list.
    ///
    /// # Errors
    ///
    /// Returns the first failed request.
    pub async fn load(&mut self) -> PageResult<()> {
        let api = &self.ctx.api;
        let loaded = tokio::try_join!(api.list_providers(), api.list_currencies(), api.list_accounts());
        match loaded {
            Ok((providers, currencies, accounts)) => {
                self.providers = providers;
                self.currencies = currencies;
                self.accounts = accounts;
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "load_advances", &err);
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
            report_failure(self.ctx.notifier.as_ref(), "filter_advances", &err);
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
        match self.ctx.api.list_advances(&self.filter).await {
            Ok(advances) => {
                self.advances = advances;
                Ok(())
            }
            Err(err) => {
                let err = PageError::from(err);
                report_failure(self.ctx.notifier.as_ref(), "list_advances", &err);
                Err(err)
            }
        }
    }

    /// Opens an empty create form dated today.
    pub fn open_create(&mut self) {
        self.form = Some(AdvanceForm::new(self.ctx.today()));
    }

    /// Closes the modal, dropping the form.
    pub fn close_modal(&mut self) {
        self.form = None;
    }

    /// Registers the open form.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error; the form stays open.
    pub async fn submit(&mut self) -> PageResult<Advance> {
        let result = self.create().await;
        let result = notify_outcome(
            self.ctx.notifier.as_ref(),
            "create_advance",
            "Advance registered",
            result,
        );
        if result.is_ok() {
            self.form = None;
            let _ = self.reload().await;
        }
        result
    }

    async fn create(&self) -> PageResult<Advance> {
        let _ticket = self.guard.try_begin()?;
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| PageError::validation("No advance form is open"))?;
        let payload = form.validate()?;
        let created = self.ctx.api.create_advance(&payload).await?;
        info!(advance_id = %created.id, amount = %created.amount, "Advance created");
        Ok(created)
    }

    /// Pays advance `id` in full from the form's account.
    ///
    /// # Errors
    ///
    /// Rejects unknown or non-pending advances and a missing account before
    /// calling the backend.
    pub async fn pay(&mut self, id: &AdvanceId, form: &PaymentForm) -> PageResult<Advance> {
        let result = self.send_payment(id, form).await;
        let result = notify_outcome(self.ctx.notifier.as_ref(), "pay_advance", "Advance paid", result);
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_payment(&self, id: &AdvanceId, form: &PaymentForm) -> PageResult<Advance> {
        let _ticket = self.guard.try_begin()?;
        let advance = self.find(id)?;
        DocumentWorkflow::pay_advance(advance.status)?;
        let mut request = form.to_request()?;
        request.amount = advance.amount;
        let paid = self.ctx.api.pay_advance(id, &request).await?;
        info!(advance_id = %paid.id, amount = %request.amount, "Advance paid");
        Ok(paid)
    }

    /// Voids a pending advance.
    ///
    /// # Errors
    ///
    /// Rejects unknown or non-pending advances before calling the backend.
    pub async fn void(&mut self, id: &AdvanceId) -> PageResult<Advance> {
        let result = self.send_void(id).await;
        let result = notify_outcome(self.ctx.notifier.as_ref(), "void_advance", "Advance voided", result);
        if result.is_ok() {
            let _ = self.reload().await;
        }
        result
    }

    async fn send_void(&self, id: &AdvanceId) -> PageResult<Advance> {
        let _ticket = self.guard.try_begin()?;
        let advance = self.find(id)?;
        DocumentWorkflow::void_advance(advance.status)?;
        let voided = self.ctx.api.void_advance(id).await?;
        info!(advance_id = %voided.id, "Advance voided");
        Ok(voided)
    }

    fn find(&self, id: &AdvanceId) -> PageResult<&Advance> {
        self.advances
            .iter()
            .find(|a| a.id.loosely_eq(id))
            .ok_or_else(|| PageError::validation(format!("Advance {id} is not in the list")))
    }
}
