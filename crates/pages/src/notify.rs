//! Notification collaborator.

use std::sync::Mutex;

/// Fire-and-forget user notifications (toasts).
pub trait Notifier: Send + Sync {
    /// Reports a successful action.
    fn success(&self, msg: &str);

    /// Reports a failed action.
    fn error(&self, msg: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, msg: &str) {
        tracing::info!(notification = msg, "success");
    }

    fn error(&self, msg: &str) {
        tracing::warn!(notification = msg, "error");
    }
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Success toast.
    Success(String),
    /// Error toast.
    Error(String),
}

impl Notification {
    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }
}

/// Keeps every notification in memory, for headless front ends and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    /// Forgets every notification.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A poisoned log is still a valid log.
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, msg: &str) {
        self.lock().push(Notification::Success(msg.to_string()));
    }

    fn error(&self, msg: &str) {
        self.lock().push(Notification::Error(msg.to_string()));
    }
}
