//! Completion notifications
//!
//! Emitted once per finished submission, after the success display has
//! elapsed and the form was cleared. Rendering the confirmation (toast,
//! alert) is up to the receiving surface.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Payload of a completed submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotification {
    /// Category of the completed submission
    pub category: String,
    /// Submitted (trimmed) title
    pub title: String,
}

impl CompletionNotification {
    /// Notification for a category and title
    #[must_use]
    pub fn new(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
        }
    }

    /// Default confirmation sentence
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} upload completed. (Simulation)", self.category)
    }
}

/// Receives completion notifications
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self, notification: &CompletionNotification);
}

/// Logs notifications through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, notification: &CompletionNotification) {
        tracing::info!(
            category = %notification.category,
            title = %notification.title,
            "{}",
            notification.message()
        );
    }
}

/// Forwards notifications into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<CompletionNotification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CompletionNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CompletionNotifier for ChannelNotifier {
    fn notify(&self, notification: &CompletionNotification) {
        if self.tx.send(notification.clone()).is_err() {
            tracing::debug!(title = %notification.title, "notification receiver dropped");
        }
    }
}
