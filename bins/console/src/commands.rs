//! Offline commands: totals and draft previews from JSON files.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use tesorero_core::document::{LineItem, PriceBasis, TaxRate, calculate_totals_with_rate};
use tesorero_core::format::{format_amount, format_date, format_money};
use tesorero_core::schedule::{ScheduleParams, SchedulePreview};
use tesorero_shared::types::{Currency, Money};

/// Document read by `tesorero totals`.
#[derive(Debug, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    basis: PriceBasis,
    #[serde(default)]
    currency: Currency,
    lines: Vec<LineItem>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Renders the totals block of a document.
pub fn render_totals(input: &DocumentInput, rate: TaxRate) -> String {
    let totals = calculate_totals_with_rate(&input.lines, input.basis, rate).rounded();
    let money = |amount| {
        format_money(&Money {
            amount,
            currency: input.currency,
        })
    };
    let mut out = String::new();
    let _ = writeln!(out, "Subtotal  {}", money(totals.subtotal()));
    let _ = writeln!(out, "Tax       {}", money(totals.tax()));
    let _ = writeln!(out, "Total     {}", money(totals.total()));
    out
}

/// Renders one row per draft followed by the schedule total.
pub fn render_preview(preview: &SchedulePreview) -> String {
    let mut out = String::new();
    for draft in preview.drafts() {
        let _ = writeln!(
            out,
            "{:>3}  {}  {:>14}",
            draft.sequence,
            format_date(draft.due_date),
            format_amount(draft.amount)
        );
    }
    let _ = writeln!(out, "Total            {:>14}", format_amount(preview.total()));
    out
}

/// `tesorero totals <file>`
pub fn totals(path: &Path, rate: TaxRate) -> anyhow::Result<String> {
    let input: DocumentInput = read_json(path)?;
    Ok(render_totals(&input, rate))
}

/// `tesorero drafts <file>`
pub fn drafts(path: &Path) -> anyhow::Result<String> {
    let params: ScheduleParams = read_json(path)?;
    let preview = SchedulePreview::new(params).context("Cannot build the draft schedule")?;
    Ok(render_preview(&preview))
}
