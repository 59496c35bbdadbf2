//! Filters for the list endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::ProviderId;

/// Filter applied to a list screen. Every change triggers a full reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Document status (`pending`, `paid`, ...).
    pub status: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    /// Restrict to one provider.
    pub provider: Option<ProviderId>,
    /// Free-text search.
    pub search: Option<String>,
}

impl ListFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by an inclusive date range.
    #[must_use]
    pub const fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Filters by provider.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Filters by free text. Blank text clears the search.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.provider.is_none()
            && self.search.is_none()
    }

    /// Checks the date range.
    ///
    /// # Errors
    ///
    /// Returns a message when `from` is after `to`.
    pub fn validate(&self) -> Result<(), String> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(format!(
                "Start date {from} is after end date {to}"
            )),
            _ => Ok(()),
        }
    }

    /// Query-string pairs for the HTTP layer, in a stable order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = &self.status {
            query.push(("status", status.clone()));
        }
        if let Some(from) = self.from {
            query.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            query.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(provider) = &self.provider {
            query.push(("provider_id", provider.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}
