//! Event broadcaster backing the change-notification fan-out.
//!
//! Uses tokio's broadcast channel for multi-producer, multi-consumer
//! messaging. Cloning the broadcaster is cheap and all clones share the same
//! channel.

use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::ChangeEvent;

/// Default buffer size for the broadcast channel.
/// Slow receivers that fall further behind than this drop older events.
const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Broadcaster for change events.
///
/// # Example
///
/// ```
/// use reliefnet_core::events::{ChangeEvent, EventBroadcaster};
///
/// let broadcaster = EventBroadcaster::new();
/// let mut receiver = broadcaster.subscribe();
///
/// broadcaster.send(ChangeEvent::DisasterUpdated { record: serde_json::json!({}) });
/// ```
#[derive(Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBroadcaster {
    /// Create a new broadcaster with default buffer size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new broadcaster with custom buffer size.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new broadcaster wrapped in an Arc for sharing.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Send an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, 0 when no
    /// subscriber is connected.
    pub fn send(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or_default()
    }

    /// Send a `disaster_updated` event carrying the affected record.
    pub fn send_disaster_updated(&self, record: serde_json::Value) -> usize {
        self.send(ChangeEvent::DisasterUpdated { record })
    }

    /// Send a `disaster_updated` deletion marker for the given id.
    pub fn send_disaster_deleted(&self, id: impl Into<String>) -> usize {
        self.send(ChangeEvent::DisasterDeleted { id: id.into() })
    }

    /// Send a `social_media_updated` event.
    pub fn send_social_media_updated(&self, posts: serde_json::Value) -> usize {
        self.send(ChangeEvent::SocialMediaUpdated { posts })
    }

    /// Send a `resources_updated` event.
    pub fn send_resources_updated(&self, resources: serde_json::Value) -> usize {
        self.send(ChangeEvent::ResourcesUpdated { resources })
    }

    /// Subscribe to events.
    ///
    /// The receiver only sees events broadcast after subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Check if there are any active subscribers.
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBroadcaster")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
