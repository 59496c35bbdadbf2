//! Core back-office logic for Tesorero.
//!
//! This crate contains pure logic with ZERO network dependencies. Screens in
//! `tesorero-pages` drive it; nothing here performs I/O.
//!
//! # Modules
//!
//! - `document` - Line items and subtotal/tax/total calculation
//! - `format` - Amount and date formatting
//! - `payment` - Payment rows and the even splitter
//! - `schedule` - Installment draft generation and the editable preview
//! - `select` - Filterable select state machine
//! - `tolerance` - The 0.01 sum tolerance shared by commit checks
//! - `workflow` - Document status transition rules

pub mod document;
pub mod format;
pub mod payment;
pub mod schedule;
pub mod select;
pub mod tolerance;
pub mod workflow;
