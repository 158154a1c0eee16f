use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

use reliefnet_storage::{
    CacheEntry, CacheStore, DisasterRecord, DisasterStore, DisasterUpdate, NewDisaster,
    ResourceRecord, StorageError,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the hosted store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Base URL of the REST API, e.g. `https://project.example.co/rest/v1`.
    pub base_url: String,
    /// Service key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Record + cache store backed by a PostgREST-style hosted API.
pub struct RestStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::connection(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends the request and maps transport failures and non-2xx statuses
    /// into storage errors. Error bodies are surfaced verbatim.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, StorageError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StorageError::connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "store request failed");
        if status == StatusCode::NOT_FOUND {
            Err(StorageError::backend(format!("not found: {body}")))
        } else {
            Err(StorageError::backend(body))
        }
    }

    async fn decode_rows<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<Vec<T>, StorageError> {
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StorageError::backend(format!("malformed store response: {e}")))
    }

    /// Fetches a single disaster row by id.
    async fn fetch_disaster(&self, id: &str) -> Result<DisasterRecord, StorageError> {
        let request = self
            .authed(self.http.get(self.endpoint("disasters")))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())]);
        let rows: Vec<DisasterRecord> = Self::decode_rows(self.execute(request).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::not_found("disaster", id))
    }
}

#[async_trait]
impl DisasterStore for RestStore {
    async fn create_disaster(&self, new: NewDisaster) -> Result<DisasterRecord, StorageError> {
        if let Some(location) = &new.location {
            location.validate()?;
        }
        let record = DisasterRecord::from_new(Uuid::new_v4().to_string(), new);
        let request = self
            .authed(self.http.post(self.endpoint("disasters")))
            .header("Prefer", "return=representation")
            .json(&json!([record]));

        let rows: Vec<DisasterRecord> = Self::decode_rows(self.execute(request).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::backend("insert returned no representation"))
    }

    async fn list_disasters(
        &self,
        tag: Option<&str>,
    ) -> Result<Vec<DisasterRecord>, StorageError> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        if let Some(tag) = tag {
            // PostgREST array containment: tags @> {tag}
            query.push(("tags".to_string(), format!("cs.{{{tag}}}")));
        }
        let request = self
            .authed(self.http.get(self.endpoint("disasters")))
            .query(&query);
        Self::decode_rows(self.execute(request).await?).await
    }

    async fn update_disaster(
        &self,
        id: &str,
        update: DisasterUpdate,
    ) -> Result<DisasterRecord, StorageError> {
        if let Some(location) = &update.location {
            location.validate()?;
        }
        // Read-modify-write so the audit trail appends instead of being
        // replaced by a single-entry array.
        let mut record = self.fetch_disaster(id).await?;
        record.apply_update(update);

        let request = self
            .authed(self.http.patch(self.endpoint("disasters")))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&record);

        let rows: Vec<DisasterRecord> = Self::decode_rows(self.execute(request).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::not_found("disaster", id))
    }

    async fn delete_disaster(&self, id: &str) -> Result<(), StorageError> {
        let request = self
            .authed(self.http.delete(self.endpoint("disasters")))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");

        let rows: Vec<Value> = Self::decode_rows(self.execute(request).await?).await?;
        if rows.is_empty() {
            return Err(StorageError::not_found("disaster", id));
        }
        Ok(())
    }

    async fn nearby_resources(
        &self,
        lat: f64,
        lon: f64,
        radius_m: f64,
    ) -> Result<Vec<ResourceRecord>, StorageError> {
        let request = self
            .authed(self.http.post(self.endpoint("rpc/nearby_resources")))
            .json(&json!({ "lat": lat, "lon": lon, "radius": radius_m }));
        Self::decode_rows(self.execute(request).await?).await
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

#[async_trait]
impl CacheStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let request = self
            .authed(self.http.get(self.endpoint("cache")))
            .query(&[("key", format!("eq.{key}")), ("select", "*".to_string())]);

        let rows: Vec<CacheEntry> = Self::decode_rows(self.execute(request).await?).await?;
        let now = OffsetDateTime::now_utc();
        Ok(rows
            .into_iter()
            .next()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value))
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<(), StorageError> {
        let entry = CacheEntry::new(key, value, ttl);
        let request = self
            .authed(self.http.post(self.endpoint("cache")))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&json!([entry]));
        self.execute(request).await?;
        Ok(())
    }
}
