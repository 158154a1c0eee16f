use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use reliefnet_core::GeoPoint;
use reliefnet_storage::{
    CacheEntry, CacheStore, DisasterRecord, DisasterStore, DisasterUpdate, NewDisaster,
    ResourceRecord, StorageError,
};

/// In-memory storage backend using concurrent hash maps.
///
/// Implements both the record store and the cache store:
/// - Full disaster CRUD with audit-trail stamping
/// - Tag filtering with exact set membership
/// - Haversine proximity queries over seeded resources
/// - TTL cache with upsert semantics and read-side expiry
#[derive(Debug, Default)]
pub struct InMemoryStore {
    disasters: DashMap<String, DisasterRecord>,
    resources: DashMap<String, ResourceRecord>,
    cache: DashMap<String, CacheEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a relief resource, used by tests and local fixtures.
    pub fn seed_resource(&self, name: impl Into<String>, location: GeoPoint) -> ResourceRecord {
        let record = ResourceRecord {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            location_name: String::new(),
            location,
            created_at: OffsetDateTime::now_utc(),
            distance_m: None,
        };
        self.resources.insert(record.id.clone(), record.clone());
        record
    }

    /// Number of live (non-expired) cache entries. Expired entries linger
    /// until overwritten, mirroring the read-side-expiry contract.
    pub fn cache_len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.cache.iter().filter(|e| !e.is_expired(now)).count()
    }
}

#[async_trait]
impl DisasterStore for InMemoryStore {
    async fn create_disaster(&self, new: NewDisaster) -> Result<DisasterRecord, StorageError> {
        if let Some(location) = &new.location {
            location.validate()?;
        }
        let record = DisasterRecord::from_new(Uuid::new_v4().to_string(), new);
        self.disasters.insert(record.id.clone(), record.clone());
        tracing::debug!(id = %record.id, "disaster created");
        Ok(record)
    }

    async fn list_disasters(
        &self,
        tag: Option<&str>,
    ) -> Result<Vec<DisasterRecord>, StorageError> {
        let mut records: Vec<DisasterRecord> = self
            .disasters
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|record| tag.is_none_or(|t| record.has_tag(t)))
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn update_disaster(
        &self,
        id: &str,
        update: DisasterUpdate,
    ) -> Result<DisasterRecord, StorageError> {
        if let Some(location) = &update.location {
            location.validate()?;
        }
        let mut entry = self
            .disasters
            .get_mut(id)
            .ok_or_else(|| StorageError::not_found("disaster", id))?;
        entry.apply_update(update);
        Ok(entry.clone())
    }

    async fn delete_disaster(&self, id: &str) -> Result<(), StorageError> {
        self.disasters
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("disaster", id))
    }

    async fn nearby_resources(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
    ) -> Result<Vec<ResourceRecord>, StorageError> {
        let origin = GeoPoint::new(lat, lon);
        let mut hits: Vec<ResourceRecord> = self
            .resources
            .iter()
            .filter_map(|entry| {
                let distance = origin.distance_m(&entry.location);
                (distance <= radius_m).then(|| {
                    let mut record = entry.value().clone();
                    record.distance_m = Some(distance);
                    record
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance_m
                .partial_cmp(&b.distance_m)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(hits)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .cache
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<(), StorageError> {
        self.cache
            .insert(key.to_string(), CacheEntry::new(key, value, ttl));
        Ok(())
    }
}
