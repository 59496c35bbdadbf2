//! Double-submit protection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PageError;

/// Rejects a second submission while one is in flight.
///
/// [`SubmitGuard::try_begin`] hands out a [`SubmitTicket`]; the flag resets
/// when the ticket is dropped, including when the submitting future is
/// dropped mid-flight.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    /// Creates an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a submission as started.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Busy` if another submission holds a ticket.
    pub fn try_begin(&self) -> Result<SubmitTicket, PageError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PageError::Busy)?;
        Ok(SubmitTicket {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Whether a submission is in flight; renderers disable buttons on it.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof of an in-flight submission. Dropping it frees the guard.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the ticket is dropped"]
pub struct SubmitTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
