//! Filterable single-selection dropdown.
//!
//! Two variants share one state machine: a popup anchored to a form field
//! and an inline table-cell select with a clear row. Options are any type;
//! the caller supplies display/value selectors through [`OptionAccessor`].

pub mod accessor;
pub mod widget;


pub use accessor::{OptionAccessor, ScalarOption};
pub use widget::{
    DEFAULT_FOCUS_DELAY, FilterableSelect, Row, SelectEffect, SelectEvent, SelectLabels,
    SelectState, SelectVariant, SelectView,
};
