//! Collaborators and settings shared by every page.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tesorero_client::BackofficeApi;
use tesorero_core::document::TaxRate;
use tesorero_shared::AppConfig;
use tesorero_shared::config::UiConfig;

use crate::error::PageError;
use crate::notify::Notifier;

/// What a page controller needs from its host.
#[derive(Clone)]
pub struct PageContext {
    /// Backend collaborator.
    pub api: Arc<dyn BackofficeApi>,
    /// Notification collaborator.
    pub notifier: Arc<dyn Notifier>,
    /// Rate used by every total calculation.
    pub tax_rate: TaxRate,
    /// Screen defaults.
    pub ui: UiConfig,
}

impl PageContext {
    /// Creates a context with the standard tax rate and default screen settings.
    pub fn new(api: Arc<dyn BackofficeApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            tax_rate: TaxRate::STANDARD,
            ui: UiConfig::default(),
        }
    }

    /// Creates a context from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` if the configured tax rate is invalid.
    pub fn from_config(
        config: &AppConfig,
        api: Arc<dyn BackofficeApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, PageError> {
        Ok(Self {
            api,
            notifier,
            tax_rate: TaxRate::new(config.tax.rate)?,
            ui: config.ui.clone(),
        })
    }

    /// Delay before a select's filter input grabs focus.
    #[must_use]
    pub const fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.ui.filter_focus_delay_ms)
    }

    /// Default date for new documents.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tesorero_shared::config::{ApiConfig, TaxConfig};

    use crate::notify::TracingNotifier;
    use crate::testing::FakeApi;

    fn config(rate: rust_decimal::Decimal) -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                timeout_secs: 15,
            },
            tax: TaxConfig { rate },
            ui: UiConfig {
                filter_focus_delay_ms: 120,
                ..UiConfig::default()
            },
        }
    }

    #[test]
    fn test_from_config() {
        let ctx = PageContext::from_config(
            &config(dec!(0.10)),
            Arc::new(FakeApi::seeded()),
            Arc::new(TracingNotifier),
        )
        .unwrap();
        assert_eq!(ctx.tax_rate.value(), dec!(0.10));
        assert_eq!(ctx.focus_delay(), Duration::from_millis(120));
        assert_eq!(ctx.ui.default_draft_interval_days, 30);
        ctx.notifier.success("Configured");
    }

    #[test]
    fn test_from_config_rejects_negative_rate() {
        let result = PageContext::from_config(
            &config(dec!(-0.18)),
            Arc::new(FakeApi::seeded()),
            Arc::new(TracingNotifier),
        );
        assert!(matches!(result, Err(PageError::Validation(_))));
    }
}
