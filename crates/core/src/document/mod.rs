//! Document lines and the total/tax calculator.
//!
//! - Category lines (invoices, expenses) and article lines (purchase orders)
//! - Totals derived fresh from the lines on every change
//! - Line validation before submission

pub mod error;
pub mod lines;
pub mod totals;
pub mod validation;

#[cfg(test)]
mod totals_props;

pub use error::DocumentError;
pub use lines::{ArticleLine, LineItem, PriceBasis, TaxableLine};
pub use totals::{TAX_RATE, TaxRate, Totals, calculate_totals, calculate_totals_with_rate};
pub use validation::{validate_article_lines, validate_line_items, validate_positive_total};
