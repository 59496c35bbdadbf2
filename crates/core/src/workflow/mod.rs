//! Document lifecycle rules.
//!
//! Client-side prechecks for the status transitions the backend performs,
//! so screens can disable actions and reject obviously invalid requests
//! before a round-trip.
//!
//! # Modules
//!
//! - `types` - Document statuses (invoice, advance, expense, order, draft)
//! - `error` - Workflow-specific error types
//! - `service` - Transition rules

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::DocumentWorkflow;
pub use types::{
    AdvanceStatus, DraftSnapshot, DraftStatus, ExpenseStatus, InvoiceStatus, OrderStatus,
};
