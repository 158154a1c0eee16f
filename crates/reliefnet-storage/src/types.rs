//! Record types exchanged with the storage backends.

use reliefnet_core::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A single entry in a disaster record's audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The mutating action ("create", "update").
    pub action: String,
    /// The user the action is attributed to.
    pub user_id: String,
    /// When the action happened.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl AuditEntry {
    fn now(action: &str, user_id: impl Into<String>) -> Self {
        Self {
            action: action.to_string(),
            user_id: user_id.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Audit entry for a record creation.
    #[must_use]
    pub fn create(user_id: impl Into<String>) -> Self {
        Self::now("create", user_id)
    }

    /// Audit entry for a record update.
    #[must_use]
    pub fn update(user_id: impl Into<String>) -> Self {
        Self::now("update", user_id)
    }
}

/// A disaster record as stored in the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterRecord {
    pub id: String,
    pub title: String,
    pub location_name: String,
    /// Resolved coordinates, when known.
    pub location: Option<GeoPoint>,
    pub description: String,
    pub tags: Vec<String>,
    pub owner_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Ordered log of mutating actions. Appended on every create/update.
    pub audit_trail: Vec<AuditEntry>,
}

impl DisasterRecord {
    /// Materializes a draft into a stored record: assigns the id, stamps
    /// `created_at` and the single-entry `create` audit trail.
    #[must_use]
    pub fn from_new(id: impl Into<String>, new: NewDisaster) -> Self {
        let audit_trail = vec![AuditEntry::create(new.owner_id.clone())];
        Self {
            id: id.into(),
            title: new.title,
            location_name: new.location_name,
            location: new.location,
            description: new.description,
            tags: new.tags,
            owner_id: new.owner_id,
            created_at: OffsetDateTime::now_utc(),
            audit_trail,
        }
    }

    /// Replaces the fields named in `update` and appends an `update` audit
    /// entry attributed to the update's `owner_id` (falling back to the
    /// record's current owner when the update does not carry one).
    pub fn apply_update(&mut self, update: DisasterUpdate) {
        let actor = update
            .owner_id
            .clone()
            .unwrap_or_else(|| self.owner_id.clone());

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(location_name) = update.location_name {
            self.location_name = location_name;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(owner_id) = update.owner_id {
            self.owner_id = owner_id;
        }

        self.audit_trail.push(AuditEntry::update(actor));
    }

    /// Exact, case-sensitive set-membership check on the tag list.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Payload for creating a disaster record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDisaster {
    pub title: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub owner_id: String,
}

/// Partial update payload; only the named fields are replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisasterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// A relief resource (shelter, supply point, ...) near a disaster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location_name: String,
    pub location: GeoPoint,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Distance from the query point in meters; present on proximity results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

/// A cached value with its expiry.
///
/// At most one live entry exists per key; writes upsert. Expired entries are
/// skipped on read rather than evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl CacheEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value, ttl: std::time::Duration) -> Self {
        Self {
            key: key.into(),
            value,
            expires_at: OffsetDateTime::now_utc() + ttl,
        }
    }

    /// Whether this entry is past its expiry at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}
