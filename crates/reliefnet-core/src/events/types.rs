//! Event types for change notifications.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A change notification pushed to connected subscribers.
///
/// Deletions are deliberately published under the `disaster_updated` event
/// name with a `{id, deleted: true}` payload; that is the contract clients
/// already consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A disaster record was created or updated.
    DisasterUpdated { record: Value },
    /// A disaster record was deleted.
    DisasterDeleted { id: String },
    /// Social media posts for a disaster were fetched.
    SocialMediaUpdated { posts: Value },
    /// Nearby resources for a disaster were fetched.
    ResourcesUpdated { resources: Value },
}

impl ChangeEvent {
    /// The event name as seen on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ChangeEvent::DisasterUpdated { .. } | ChangeEvent::DisasterDeleted { .. } => {
                "disaster_updated"
            }
            ChangeEvent::SocialMediaUpdated { .. } => "social_media_updated",
            ChangeEvent::ResourcesUpdated { .. } => "resources_updated",
        }
    }

    /// The payload clients receive for this event.
    pub fn payload(&self) -> Value {
        match self {
            ChangeEvent::DisasterUpdated { record } => record.clone(),
            ChangeEvent::DisasterDeleted { id } => json!({ "id": id, "deleted": true }),
            ChangeEvent::SocialMediaUpdated { posts } => posts.clone(),
            ChangeEvent::ResourcesUpdated { resources } => resources.clone(),
        }
    }

    /// The full wire frame sent to WebSocket subscribers.
    pub fn to_frame(&self) -> Value {
        json!({
            "event": self.name(),
            "payload": self.payload(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_event_frame() {
        let event = ChangeEvent::DisasterUpdated {
            record: json!({"id": "d1", "title": "Flood A"}),
        };
        let frame = event.to_frame();
        assert_eq!(frame["event"], "disaster_updated");
        assert_eq!(frame["payload"]["title"], "Flood A");
    }

    #[test]
    fn test_deleted_event_shares_updated_name() {
        let event = ChangeEvent::DisasterDeleted {
            id: "d2".to_string(),
        };
        assert_eq!(event.name(), "disaster_updated");
        let payload = event.payload();
        assert_eq!(payload["id"], "d2");
        assert_eq!(payload["deleted"], true);
    }

    #[test]
    fn test_read_triggered_event_names() {
        let social = ChangeEvent::SocialMediaUpdated { posts: json!([]) };
        assert_eq!(social.name(), "social_media_updated");

        let resources = ChangeEvent::ResourcesUpdated {
            resources: json!([]),
        };
        assert_eq!(resources.name(), "resources_updated");
    }
}
