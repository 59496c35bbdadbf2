//! Wire models.
//!
//! Records mirror what the backend returns; `*Payload` and `*Request` types
//! are what the screens send.

pub mod advance;
pub mod expense;
pub mod invoice;
pub mod order;
pub mod payment;
pub mod reference;

pub use advance::{Advance, NewAdvance};
pub use expense::{Expense, ExpensePayload};
pub use invoice::{Draft, ExchangeRequest, InvoicePayload, SupplierInvoice, VoidRequest};
pub use order::{GenerateInvoiceRequest, OrderPayload, PurchaseOrder};
pub use payment::PaymentRequest;
pub use reference::{
    Account, BusinessLine, Category, CostCenter, CurrencyOption, InventoryItem, NewProvider,
    Provider,
};
