//! Select widgets over reference data.
//!
//! Each builder returns a fresh widget seeded with the current value; the
//! renderer keeps it while the field is shown and hands its effects back to
//! the page.

use std::time::Duration;

use tesorero_client::models::{Account, Category, CurrencyOption, InventoryItem, Provider};
use tesorero_core::select::{FilterableSelect, OptionAccessor};
use tesorero_shared::types::{AccountId, ArticleId, CategoryId, Currency, ProviderId, RecordId};

/// Provider popup with the create-new row.
///
/// Options render as `name (document)` when the tax id is known.
#[must_use]
pub fn provider_select(
    providers: &[Provider],
    value: Option<&ProviderId>,
    focus_delay: Duration,
) -> FilterableSelect<Provider> {
    let accessor = OptionAccessor::new(
        |p: &Provider| p.name.clone(),
        |p: &Provider| p.id.as_record().clone(),
    )
    .with_render(|p: &Provider| match &p.document_number {
        Some(doc) => format!("{} ({doc})", p.name),
        None => p.name.clone(),
    });

    FilterableSelect::new(providers.to_vec(), accessor)
        .creatable()
        .with_focus_delay(focus_delay)
        .with_value(value.map(|id| id.as_record().clone()))
}

/// Currency popup; the value is the ISO code.
#[must_use]
pub fn currency_select(
    currencies: &[CurrencyOption],
    value: Currency,
    focus_delay: Duration,
) -> FilterableSelect<CurrencyOption> {
    let accessor = OptionAccessor::new(
        |c: &CurrencyOption| format!("{} {}", c.code.symbol(), c.code.code()),
        |c: &CurrencyOption| RecordId::from(c.code.code()),
    );

    FilterableSelect::new(currencies.to_vec(), accessor)
        .with_focus_delay(focus_delay)
        .with_value(Some(RecordId::from(value.code())))
}

/// Account popup for payment forms.
#[must_use]
pub fn account_select(
    accounts: &[Account],
    value: Option<&AccountId>,
    focus_delay: Duration,
) -> FilterableSelect<Account> {
    let accessor = OptionAccessor::new(
        |a: &Account| a.name.clone(),
        |a: &Account| a.id.as_record().clone(),
    );

    FilterableSelect::new(accounts.to_vec(), accessor)
        .with_focus_delay(focus_delay)
        .with_value(value.map(|id| id.as_record().clone()))
}

/// Category select inside a line-item table cell.
#[must_use]
pub fn category_cell_select(
    categories: &[Category],
    value: Option<&CategoryId>,
    focus_delay: Duration,
) -> FilterableSelect<Category> {
    let accessor = OptionAccessor::new(
        |c: &Category| c.name.clone(),
        |c: &Category| c.id.as_record().clone(),
    );

    FilterableSelect::new(categories.to_vec(), accessor)
        .in_table_cell()
        .with_focus_delay(focus_delay)
        .with_value(value.map(|id| id.as_record().clone()))
}

/// Article select inside an order-line table cell.
#[must_use]
pub fn article_cell_select(
    items: &[InventoryItem],
    value: Option<&ArticleId>,
    focus_delay: Duration,
) -> FilterableSelect<InventoryItem> {
    let accessor = OptionAccessor::new(
        |i: &InventoryItem| i.name.clone(),
        |i: &InventoryItem| i.id.as_record().clone(),
    );

    FilterableSelect::new(items.to_vec(), accessor)
        .in_table_cell()
        .with_focus_delay(focus_delay)
        .with_value(value.map(|id| id.as_record().clone()))
}
