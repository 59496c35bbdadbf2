//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Local validation error, raised before any backend call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation detected on the client.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// The backend rejected the request.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., a submission is already in flight).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code used in logs and notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Rejected(_) => "REJECTED",
            Self::Network(_) => "NETWORK_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was raised locally, without a backend round-trip.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BusinessRule(_) | Self::Conflict(_)
        )
    }

    /// Returns the message shown to the user.
    ///
    /// Network and internal failures get a generic message; the detail is
    /// only logged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::BusinessRule(msg)
            | Self::Rejected(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg.clone(),
            Self::Network(_) => "Could not reach the server".to_string(),
            Self::Configuration(_) | Self::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::BusinessRule(String::new()).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(AppError::Rejected(String::new()).error_code(), "REJECTED");
        assert_eq!(
            AppError::Network(String::new()).error_code(),
            "NETWORK_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_is_local() {
        assert!(AppError::Validation("x".into()).is_local());
        assert!(AppError::BusinessRule("x".into()).is_local());
        assert!(AppError::Conflict("x".into()).is_local());
        assert!(!AppError::Rejected("x".into()).is_local());
        assert!(!AppError::Network("x".into()).is_local());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            AppError::Rejected("Duplicate number".into()).user_message(),
            "Duplicate number"
        );
        assert_eq!(
            AppError::Network("connection refused".into()).user_message(),
            "Could not reach the server"
        );
        assert_eq!(
            AppError::Internal("boom".into()).user_message(),
            "An unexpected error occurred"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Rejected("msg".into()).to_string(),
            "Rejected by server: msg"
        );
        assert_eq!(
            AppError::Network("msg".into()).to_string(),
            "Network error: msg"
        );
    }
}
