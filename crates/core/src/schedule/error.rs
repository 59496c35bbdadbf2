//! Schedule error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while generating, editing or committing a draft schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Number of drafts must be at least 1.
    #[error("Number of drafts must be at least 1")]
    ZeroCount,

    /// Interval between drafts must be at least one day.
    #[error("Interval between drafts must be at least 1 day")]
    ZeroInterval,

    /// Nothing to split.
    #[error("Balance to split must be positive, got {0}")]
    NonPositiveBalance(Decimal),

    /// A due date falls outside the supported calendar.
    #[error("Due date out of range starting from {start} every {interval_days} days")]
    DateOutOfRange {
        /// Start date.
        start: NaiveDate,
        /// Interval in days.
        interval_days: u32,
    },

    /// The edited row does not exist.
    #[error("Draft {0} does not exist in the schedule")]
    UnknownSequence(u32),

    /// A draft amount is zero or negative.
    #[error("Draft {sequence}: amount must be positive")]
    NonPositiveDraft {
        /// 1-based sequence.
        sequence: u32,
    },

    /// Drafts do not add up to the required total.
    #[error("Drafts add up to {computed}, but they must add up to {required}")]
    SumMismatch {
        /// Sum of the draft amounts.
        computed: Decimal,
        /// Amount the drafts must cover.
        required: Decimal,
    },
}

impl ScheduleError {
    /// Returns the error code for logs and notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroCount => "ZERO_COUNT",
            Self::ZeroInterval => "ZERO_INTERVAL",
            Self::NonPositiveBalance(_) => "NON_POSITIVE_BALANCE",
            Self::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            Self::UnknownSequence(_) => "UNKNOWN_SEQUENCE",
            Self::NonPositiveDraft { .. } => "NON_POSITIVE_DRAFT",
            Self::SumMismatch { .. } => "DRAFT_SUM_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_mismatch_names_both_sums() {
        let err = ScheduleError::SumMismatch {
            computed: Decimal::new(99_000, 2),
            required: Decimal::new(100_000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Drafts add up to 990.00, but they must add up to 1000.00"
        );
        assert_eq!(err.error_code(), "DRAFT_SUM_MISMATCH");
    }
}
