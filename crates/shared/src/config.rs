//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Tax configuration.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Screen behaviour configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend REST API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the back-office API (e.g. `https://erp.example.com/api/v1`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

/// Tax configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Sales tax rate applied to taxed lines (IGV, 18%).
    #[serde(default = "default_tax_rate")]
    pub rate: Decimal,
}

fn default_tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            rate: default_tax_rate(),
        }
    }
}

/// Screen behaviour configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Delay before the select filter input grabs focus.
    #[serde(default = "default_filter_focus_delay_ms")]
    pub filter_focus_delay_ms: u64,
    /// Default spacing between drafts when an exchange modal opens.
    #[serde(default = "default_draft_interval_days")]
    pub default_draft_interval_days: u32,
    /// Default number of drafts when an exchange modal opens.
    #[serde(default = "default_draft_count")]
    pub default_draft_count: u32,
}

fn default_filter_focus_delay_ms() -> u64 {
    50
}

fn default_draft_interval_days() -> u32 {
    30
}

fn default_draft_count() -> u32 {
    1
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            filter_focus_delay_ms: default_filter_focus_delay_ms(),
            default_draft_interval_days: default_draft_interval_days(),
            default_draft_count: default_draft_count(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESORERO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
