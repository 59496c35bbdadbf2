//! Outcome reporting shared by the page actions.

use tracing::{error, warn};

use crate::error::{PageError, PageResult};
use crate::notify::Notifier;

/// Logs a failed action and shows its message.
pub(crate) fn report_failure(notifier: &dyn Notifier, action: &'static str, err: &PageError) {
    match err {
        PageError::Validation(msg) => warn!(action, reason = %msg, "Rejected locally"),
        PageError::Busy => warn!(action, "Submission already in flight"),
        PageError::Rejected(msg) => warn!(action, reason = %msg, "Rejected by server"),
        PageError::Network(msg) => error!(action, error = %msg, "Backend unreachable"),
    }
    notifier.error(&err.user_message());
}

/// Notifies success or failure and hands the result back.
pub(crate) fn notify_outcome<T>(
    notifier: &dyn Notifier,
    action: &'static str,
    success: &str,
    result: PageResult<T>,
) -> PageResult<T> {
    match &result {
        Ok(_) => notifier.success(success),
        Err(err) => report_failure(notifier, action, err),
    }
    result
}
