//! Display formatting for amounts and dates.
//!
//! Amounts use `,` as thousands separator and `.` as decimal mark with two
//! decimals; dates use `dd/mm/yyyy`.

pub mod date;
pub mod money;

pub use date::{DATE_FORMAT, DateParseError, format_date, parse_date};
pub use money::{format_amount, format_money};
