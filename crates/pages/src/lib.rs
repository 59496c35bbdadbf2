//! Screen controllers for the back office.
//!
//! This crate provides one controller per screen (advances, supplier
//! invoices, expenses, purchase orders). A controller owns the list, the
//! reference data and the open form; a renderer reads its state and calls
//! its actions. Every action validates locally, calls the
//! [`BackofficeApi`](tesorero_client::BackofficeApi), reports the outcome
//! through a [`Notifier`] and reloads the list after a successful mutation.

pub mod advances;
pub mod context;
pub mod error;
pub mod expenses;
pub mod forms;
pub mod guard;
pub mod notify;
pub mod purchase_orders;
pub mod selects;
pub mod supplier_invoices;

mod report;

#[cfg(test)]
mod testing;


pub use advances::{AdvanceForm, AdvancesPage};
pub use context::PageContext;
pub use error::{PageError, PageResult};
pub use expenses::{ExpenseForm, ExpensesPage};
pub use forms::{Editor, FormMode, PaymentForm};
pub use guard::{SubmitGuard, SubmitTicket};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use purchase_orders::{OrderForm, PurchaseOrdersPage};
pub use supplier_invoices::{ExchangeModal, InvoiceForm, SupplierInvoicesPage};
