//! Storage traits every record/cache backend implements.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;
use crate::types::{DisasterRecord, DisasterUpdate, NewDisaster, ResourceRecord};

/// The record store every backend must implement.
///
/// The backend is the sole owner of durable state; callers hold no in-memory
/// copy of records. Implementations must be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use reliefnet_storage::{DisasterStore, StorageError};
///
/// async fn flood_reports(store: &dyn DisasterStore) -> Result<usize, StorageError> {
///     Ok(store.list_disasters(Some("flood")).await?.len())
/// }
/// ```
#[async_trait]
pub trait DisasterStore: Send + Sync {
    /// Creates a disaster record.
    ///
    /// The backend assigns the id and stamps `created_at` plus the
    /// single-entry `create` audit trail before persisting.
    async fn create_disaster(&self, new: NewDisaster) -> Result<DisasterRecord, StorageError>;

    /// Lists disaster records, optionally filtered by tag.
    ///
    /// The tag filter is exact, case-sensitive set membership on the record's
    /// tag list, not a substring match.
    async fn list_disasters(&self, tag: Option<&str>)
    -> Result<Vec<DisasterRecord>, StorageError>;

    /// Updates a disaster record, replacing only the fields named in
    /// `update` and appending an `update` audit entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn update_disaster(
        &self,
        id: &str,
        update: DisasterUpdate,
    ) -> Result<DisasterRecord, StorageError>;

    /// Deletes a disaster record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn delete_disaster(&self, id: &str) -> Result<(), StorageError>;

    /// Returns relief resources within `radius_m` meters of the given point,
    /// nearest first. Proximity computation is delegated to the backend.
    async fn nearby_resources(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
    ) -> Result<Vec<ResourceRecord>, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Key/value cache with per-entry expiry.
///
/// Writes upsert: a write for an existing key replaces its value and resets
/// the expiry to `now + ttl`. Expired entries are skipped on read, never
/// proactively evicted.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live value for `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Upserts `value` under `key` with the given time-to-live.
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<(), StorageError>;
}

// Ensure traits are object-safe by using them as trait objects
#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that DisasterStore is object-safe
    fn _assert_store_object_safe(_: &dyn DisasterStore) {}

    // Compile-time test that CacheStore is object-safe
    fn _assert_cache_object_safe(_: &dyn CacheStore) {}
}
