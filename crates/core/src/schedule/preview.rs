//! Editable schedule preview held by the exchange modal.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ScheduleError;
use super::generator::generate_schedule;
use super::types::{DraftPreview, ScheduleParams};
use crate::tolerance::within_tolerance;

/// Draft preview with per-row manual overrides.
///
/// Changing count, interval or start date regenerates every row from scratch
/// and discards manual edits. Editing a row's amount or date touches only
/// that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePreview {
    params: ScheduleParams,
    drafts: Vec<DraftPreview>,
}

impl SchedulePreview {
    /// Generates the initial preview.
    ///
    /// # Errors
    ///
    /// See [`generate_schedule`].
    pub fn new(params: ScheduleParams) -> Result<Self, ScheduleError> {
        let drafts = generate_schedule(&params)?;
        Ok(Self { params, drafts })
    }

    /// Current parameters.
    #[must_use]
    pub const fn params(&self) -> &ScheduleParams {
        &self.params
    }

    /// Current rows, in sequence order.
    #[must_use]
    pub fn drafts(&self) -> &[DraftPreview] {
        &self.drafts
    }

    /// Changes the number of drafts and regenerates.
    ///
    /// # Errors
    ///
    /// Leaves the preview untouched and returns the generation error.
    pub fn set_count(&mut self, count: u32) -> Result<(), ScheduleError> {
        self.regenerate(ScheduleParams {
            count,
            ..self.params
        })
    }

    /// Changes the interval and regenerates.
    ///
    /// # Errors
    ///
    /// Leaves the preview untouched and returns the generation error.
    pub fn set_interval_days(&mut self, interval_days: u32) -> Result<(), ScheduleError> {
        self.regenerate(ScheduleParams {
            interval_days,
            ..self.params
        })
    }

    /// Changes the start date and regenerates.
    ///
    /// # Errors
    ///
    /// Leaves the preview untouched and returns the generation error.
    pub fn set_start_date(&mut self, start_date: NaiveDate) -> Result<(), ScheduleError> {
        self.regenerate(ScheduleParams {
            start_date,
            ..self.params
        })
    }

    fn regenerate(&mut self, params: ScheduleParams) -> Result<(), ScheduleError> {
        self.drafts = generate_schedule(&params)?;
        self.params = params;
        Ok(())
    }

    /// Overrides one row's amount.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::UnknownSequence` if the row does not exist.
    pub fn edit_amount(&mut self, sequence: u32, amount: Decimal) -> Result<(), ScheduleError> {
        self.row_mut(sequence)?.amount = amount;
        Ok(())
    }

    /// Overrides one row's due date.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::UnknownSequence` if the row does not exist.
    pub fn edit_due_date(&mut self, sequence: u32, due_date: NaiveDate) -> Result<(), ScheduleError> {
        self.row_mut(sequence)?.due_date = due_date;
        Ok(())
    }

    fn row_mut(&mut self, sequence: u32) -> Result<&mut DraftPreview, ScheduleError> {
        self.drafts
            .iter_mut()
            .find(|d| d.sequence == sequence)
            .ok_or(ScheduleError::UnknownSequence(sequence))
    }

    /// Sum of the row amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.drafts.iter().map(|d| d.amount).sum()
    }

    /// `required - total()`; positive when the drafts fall short.
    #[must_use]
    pub fn difference(&self, required: Decimal) -> Decimal {
        required - self.total()
    }

    /// Checks the commit precondition.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::NonPositiveDraft` for a zero or negative row,
    /// or `ScheduleError::SumMismatch` when the rows miss `required` by 0.01
    /// or more.
    pub fn validate_commit(&self, required: Decimal) -> Result<(), ScheduleError> {
        if let Some(draft) = self.drafts.iter().find(|d| d.amount <= Decimal::ZERO) {
            return Err(ScheduleError::NonPositiveDraft {
                sequence: draft.sequence,
            });
        }

        let computed = self.total();
        if !within_tolerance(computed, required) {
            return Err(ScheduleError::SumMismatch { computed, required });
        }
        Ok(())
    }

    /// Consumes the preview, returning its rows.
    #[must_use]
    pub fn into_drafts(self) -> Vec<DraftPreview> {
        self.drafts
    }
}
