//! Form plumbing shared by the pages.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesorero_client::models::PaymentRequest;
use tesorero_core::payment::PaymentMethod;
use tesorero_shared::types::AccountId;

use crate::error::PageError;

/// Whether a modal creates a record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    /// New record.
    Create,
    /// Existing record.
    Edit(Id),
}

/// An open create/edit modal. Dropped on success, kept on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor<Id, F> {
    /// Create or edit.
    pub mode: FormMode<Id>,
    /// Form state.
    pub form: F,
}

impl<Id, F> Editor<Id, F> {
    /// Opens a create modal.
    pub const fn create(form: F) -> Self {
        Self {
            mode: FormMode::Create,
            form,
        }
    }

    /// Opens an edit modal for `id`.
    pub const fn edit(id: Id, form: F) -> Self {
        Self {
            mode: FormMode::Edit(id),
            form,
        }
    }
}

/// Payment modal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    /// Account the money leaves from.
    pub account_id: Option<AccountId>,
    /// Payment method.
    pub method: PaymentMethod,
    /// Paid amount.
    pub amount: Decimal,
    /// Date of the payment.
    pub payment_date: NaiveDate,
    /// Operation or check number.
    pub reference: String,
}

impl PaymentForm {
    /// Creates a form for `amount` dated `payment_date`.
    #[must_use]
    pub fn new(amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            account_id: None,
            method: PaymentMethod::default(),
            amount,
            payment_date,
            reference: String::new(),
        }
    }

    /// Sets the account.
    #[must_use]
    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` without an account or with a
    /// non-positive amount.
    pub fn to_request(&self) -> Result<PaymentRequest, PageError> {
        let account_id = self
            .account_id
            .clone()
            .ok_or_else(|| PageError::validation("Select the account the payment is made from"))?;
        if self.amount <= Decimal::ZERO {
            return Err(PageError::validation("Payment amount must be greater than zero"));
        }
        Ok(PaymentRequest {
            account_id,
            method: self.method,
            amount: self.amount,
            payment_date: self.payment_date,
            reference: self.reference.trim().to_string(),
        })
    }
}

/// Removes row `index`; `false` when out of range.
pub(crate) fn remove_row<T>(rows: &mut Vec<T>, index: usize) -> bool {
    if index < rows.len() {
        rows.remove(index);
        true
    } else {
        false
    }
}

/// Replaces row `index`; `false` when out of range.
pub(crate) fn replace_row<T>(rows: &mut [T], index: usize, row: T) -> bool {
    match rows.get_mut(index) {
        Some(slot) => {
            *slot = row;
            true
        }
        None => false,
    }
}
