//! Notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] is the fire-and-forget sink for user-facing
//! notifications. It is shared via `Arc<NotificationBus>` across the
//! application; nothing the core does ever depends on a delivery result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Presentation style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Neutral confirmation of a completed action.
    Default,
    /// An error the user should see.
    Destructive,
}

/// A user-facing notification.
///
/// Constructed via [`Notification::success`] or [`Notification::error`],
/// mirroring the two toast shapes the workshop emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    /// When the notification was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// A success confirmation, e.g. "Panel created".
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
            timestamp: Utc::now(),
        }
    }

    /// A failure notification carrying the underlying error message.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for [`Notification`]s.
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no active subscribers the notification is silently
    /// dropped; publishing never fails.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            title = %notification.title,
            variant = ?notification.variant,
            "publishing notification"
        );
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    /// Subscribe to all notifications published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_notification() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        bus.publish(Notification::success(
            "Panel created",
            "Your comic panel has been created successfully.",
        ));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, "Panel created");
        assert_eq!(received.variant, NotificationVariant::Default);
    }

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let bus = NotificationBus::default();
        bus.publish(Notification::error("Failed to create panel", "boom"));
    }

    #[tokio::test]
    async fn each_subscriber_sees_every_notification() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Notification::error("Failed to generate image", "quota exceeded"));

        assert_eq!(rx1.recv().await.unwrap().description, "quota exceeded");
        assert_eq!(rx2.recv().await.unwrap().description, "quota exceeded");
    }

    #[test]
    fn variants_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(NotificationVariant::Destructive).unwrap(),
            serde_json::json!("destructive")
        );
    }
}
