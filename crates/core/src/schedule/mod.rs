//! Installment draft ("letra") schedules.
//!
//! An invoice balance is split into N equal drafts spaced at a fixed day
//! interval. The preview can be edited row by row before it is committed
//! to the backend through the exchange endpoint.

pub mod error;
pub mod generator;
pub mod preview;
pub mod types;

#[cfg(test)]
mod generator_props;

pub use error::ScheduleError;
pub use generator::generate_schedule;
pub use preview::SchedulePreview;
pub use types::{DraftPreview, ScheduleParams};
