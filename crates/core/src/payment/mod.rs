//! Payment rows and the payment splitter.

pub mod error;
pub mod split;

pub use error::PaymentError;
pub use split::{
    PaymentMethod, PaymentRow, equal_share, payments_total, split_evenly, validate_payments,
};
