//! Tesorero console
//!
//! Computes document totals and draft schedules offline, and checks the
//! connection to the back-office API.

mod commands;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use tesorero_client::{BackofficeApi, HttpBackofficeApi};
use tesorero_core::document::TaxRate;
use tesorero_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One directive per workspace crate.
const DEFAULT_LOG_FILTER: &str =
    "tesorero=debug,tesorero_core=debug,tesorero_client=debug,tesorero_pages=debug";

const USAGE: &str = "usage: tesorero <totals FILE | drafts FILE | references>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let command = args.next().context(USAGE)?;
    let file = args.next().map(PathBuf::from);

    match (command.as_str(), file) {
        ("totals", Some(path)) => {
            // Offline commands fall back to the standard rate without a config.
            let rate = match AppConfig::load() {
                Ok(config) => TaxRate::new(config.tax.rate)?,
                Err(_) => TaxRate::STANDARD,
            };
            print!("{}", commands::totals(&path, rate)?);
        }
        ("drafts", Some(path)) => print!("{}", commands::drafts(&path)?),
        ("references", None) => references().await?,
        _ => bail!(USAGE),
    }

    Ok(())
}

async fn references() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let api = HttpBackofficeApi::new(&config.api)?;
    info!(base_url = %api.base_url(), "Loading reference data");

    let (providers, currencies, categories, accounts, business_lines, cost_centers, items) =
        tokio::try_join!(
            api.list_providers(),
            api.list_currencies(),
            api.list_categories(),
            api.list_accounts(),
            api.list_business_lines(),
            api.list_cost_centers(),
            api.list_inventory_items(),
        )?;

    info!(
        providers = providers.len(),
        currencies = currencies.len(),
        categories = categories.len(),
        accounts = accounts.len(),
        business_lines = business_lines.len(),
        cost_centers = cost_centers.len(),
        inventory_items = items.len(),
        "Reference data loaded"
    );
    Ok(())
}
