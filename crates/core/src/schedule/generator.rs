//! Equal-split schedule generation.

use chrono::Days;
use rust_decimal::Decimal;
use tesorero_shared::types::round_amount;

use super::error::ScheduleError;
use super::types::{DraftPreview, ScheduleParams};

/// Generates the draft preview for `params`.
///
/// Draft `k` (1-based) is due `start_date + interval_days * k` days and owes
/// `balance / count` rounded to cents. The last draft is not adjusted for the
/// rounding remainder.
///
/// # Errors
///
/// Returns an error for a zero count or interval, a non-positive balance, or
/// a due date outside the calendar.
pub fn generate_schedule(params: &ScheduleParams) -> Result<Vec<DraftPreview>, ScheduleError> {
    if params.count == 0 {
        return Err(ScheduleError::ZeroCount);
    }
    if params.interval_days == 0 {
        return Err(ScheduleError::ZeroInterval);
    }
    if params.balance <= Decimal::ZERO {
        return Err(ScheduleError::NonPositiveBalance(params.balance));
    }

    let amount = round_amount(params.balance / Decimal::from(params.count));
    let out_of_range = || ScheduleError::DateOutOfRange {
        start: params.start_date,
        interval_days: params.interval_days,
    };

    (1..=params.count)
        .map(|sequence| {
            let offset = u64::from(params.interval_days) * u64::from(sequence);
            let due_date = params
                .start_date
                .checked_add_days(Days::new(offset))
                .ok_or_else(out_of_range)?;
            Ok(DraftPreview {
                sequence,
                due_date,
                amount,
            })
        })
        .collect()
}
