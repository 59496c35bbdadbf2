//! Schedule domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs of a draft schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Outstanding balance to split.
    pub balance: Decimal,
    /// Number of drafts.
    pub count: u32,
    /// Days between consecutive drafts.
    pub interval_days: u32,
    /// Reference date; the first draft falls one interval after it.
    pub start_date: NaiveDate,
}

/// One row of the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPreview {
    /// 1-based position in the schedule.
    pub sequence: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount due.
    pub amount: Decimal,
}
