//! Common types used across the application.

pub mod filter;
pub mod id;
pub mod money;

pub use filter::ListFilter;
pub use id::*;
pub use money::{AMOUNT_DECIMALS, Currency, Money, round_amount};
