//! Page action errors.

use tesorero_client::ApiError;
use tesorero_core::document::DocumentError;
use tesorero_core::payment::PaymentError;
use tesorero_core::schedule::ScheduleError;
use tesorero_core::workflow::WorkflowError;
use tesorero_shared::AppError;
use thiserror::Error;

/// Result type alias using `PageError`.
pub type PageResult<T> = Result<T, PageError>;

/// Message shown for network failures; the detail is only logged.
pub const NETWORK_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Message shown when a second submission is attempted.
pub const BUSY_MESSAGE: &str = "A submission is already in progress";

/// Why a page action failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Rejected by the backend, with its detail message.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered garbage.
    #[error("Network error: {0}")]
    Network(String),

    /// Another submission is in flight.
    #[error("A submission is already in progress")]
    Busy,
}

impl PageError {
    /// Builds a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Message for the notifier.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::Busy => BUSY_MESSAGE.to_string(),
        }
    }

    /// Returns true if no request reached the backend.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Busy)
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { detail, .. } => Self::Rejected(detail),
            ApiError::Network(msg) | ApiError::Decode(msg) => Self::Network(msg),
        }
    }
}

impl From<DocumentError> for PageError {
    fn from(err: DocumentError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PaymentError> for PageError {
    fn from(err: PaymentError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ScheduleError> for PageError {
    fn from(err: ScheduleError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<WorkflowError> for PageError {
    fn from(err: WorkflowError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Validation(msg) => Self::Validation(msg),
            PageError::Rejected(msg) => Self::Rejected(msg),
            PageError::Network(msg) => Self::Network(msg),
            PageError::Busy => Self::Conflict(BUSY_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_network_detail_hidden_from_user() {
        let err = PageError::from(ApiError::Network("tcp connect error".to_string()));
        assert_eq!(err.user_message(), NETWORK_MESSAGE);
        assert!(!err.is_local());
    }

    #[test]
    fn test_rejection_keeps_detail() {
        let err = PageError::from(ApiError::Rejected {
            status: 400,
            detail: "Invoice already paid".to_string(),
        });
        assert_eq!(err, PageError::Rejected("Invoice already paid".to_string()));
        assert_eq!(err.user_message(), "Invoice already paid");
    }

    #[test]
    fn test_domain_errors_are_local() {
        let err = PageError::from(ScheduleError::SumMismatch {
            computed: dec!(1050.00),
            required: dec!(1000.00),
        });
        assert!(err.is_local());
        assert!(err.user_message().contains("1050.00"));
        assert!(err.user_message().contains("1000.00"));
    }

    #[test]
    fn test_into_app_error() {
        assert_eq!(AppError::from(PageError::Busy).error_code(), "CONFLICT");
        assert!(AppError::from(PageError::validation("x")).is_local());
    }
}
