//! Backend error unwrapping.
//!
//! Rejections carry a JSON body in one of these shapes:
//!
//! ```json
//! {"detail": "Invoice already paid"}
//! {"detail": [{"loc": ["body", "amount"], "msg": "must be positive", "type": "value_error"}]}
//! {"message": "Invoice already paid"}
//! ```

use serde::Deserialize;
use tesorero_shared::AppError;
use thiserror::Error;

/// Result type alias using `ApiError`.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a rejection body carries nothing readable.
pub const GENERIC_REJECTION: &str = "The server rejected the request";

/// Errors returned by [`crate::BackofficeApi`] calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, see [`detail_message`].
        detail: String,
    },

    /// The request never got an answer (connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The answer could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns true if the backend answered.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status: 404, detail } => Self::NotFound(detail),
            ApiError::Rejected { status: 409, detail } => Self::Conflict(detail),
            ApiError::Rejected { detail, .. } => Self::Rejected(detail),
            ApiError::Network(msg) => Self::Network(msg),
            ApiError::Decode(msg) => Self::Internal(msg),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Items(Vec<ValidationItem>),
}

#[derive(Deserialize)]
struct ValidationItem {
    msg: String,
}

/// Extracts the user-facing message from a rejection body.
///
/// Returns the string `detail`, or the first validation item's `msg`, or
/// `message`, falling back to [`GENERIC_REJECTION`].
#[must_use]
pub fn detail_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return GENERIC_REJECTION.to_string();
    };

    let from_detail = match parsed.detail {
        Some(Detail::Text(text)) => Some(text),
        Some(Detail::Items(items)) => items.into_iter().next().map(|item| item.msg),
        None => None,
    };

    from_detail
        .or(parsed.message)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| GENERIC_REJECTION.to_string())
}
