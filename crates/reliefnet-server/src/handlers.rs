//! Request handlers.
//!
//! Each handler validates nothing beyond what is structurally required,
//! calls exactly one component (or cache then provider), and broadcasts a
//! change notification on success where the endpoint's contract says so.
//! Component errors become structured JSON errors with no partial rollback.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use reliefnet_storage::{DisasterRecord, DisasterUpdate, NewDisaster, ResourceRecord};

use crate::error::ApiError;
use crate::server::AppState;

/// Default proximity radius in meters when the query omits `radius`.
const DEFAULT_RESOURCE_RADIUS_M: f64 = 10_000.0;

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "ReliefNet Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

// ---- Disaster CRUD ----

pub async fn create_disaster(
    State(state): State<AppState>,
    Json(new): Json<NewDisaster>,
) -> Result<Json<DisasterRecord>, ApiError> {
    let record = state.disasters.create_disaster(new).await?;
    state
        .events
        .send_disaster_updated(serde_json::to_value(&record)?);
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub tag: Option<String>,
}

pub async fn list_disasters(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DisasterRecord>>, ApiError> {
    let records = state.disasters.list_disasters(params.tag.as_deref()).await?;
    Ok(Json(records))
}

pub async fn update_disaster(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<DisasterUpdate>,
) -> Result<Json<DisasterRecord>, ApiError> {
    let record = state.disasters.update_disaster(&id, update).await?;
    state
        .events
        .send_disaster_updated(serde_json::to_value(&record)?);
    Ok(Json(record))
}

pub async fn delete_disaster(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.disasters.delete_disaster(&id).await?;
    state.events.send_disaster_deleted(id);
    Ok(Json(json!({ "status": "deleted" })))
}

// ---- Provider proxies ----

#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub description: String,
}

/// Cache-then-provider: extract a place name from the description, resolve
/// it to coordinates, memoize the combined result for the TTL window.
///
/// Two concurrent misses for one description may both reach the providers;
/// the duplicate work is tolerated and the last cache write wins.
pub async fn geocode(
    State(state): State<AppState>,
    Json(request): Json<GeocodeRequest>,
) -> Result<Json<Value>, ApiError> {
    let cache_key = format!("geocode:{}", request.description);
    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let location_name = state.extractor.extract(&request.description).await?;
    let point = state.geolocator.resolve(&location_name).await?;

    let result = json!({
        "location_name": location_name,
        "lat": point.lat,
        "lng": point.lng,
    });
    state.cache.put_background(cache_key, result.clone());
    Ok(Json(result))
}

/// Social-media feed for a disaster. The upstream integration is pending;
/// the endpoint serves the fixed sample feed consumers develop against,
/// and broadcasts on every fetch per the existing contract.
pub async fn social_media(
    State(state): State<AppState>,
    Path(_id): Path<String>,
) -> Json<Value> {
    let posts = json!([
        { "post": "#floodrelief Need food in NYC", "user": "citizen1" },
        { "post": "Water supplies low in Manhattan", "user": "citizen2" }
    ]);
    state.events.send_social_media_updated(posts.clone());
    Json(posts)
}

#[derive(Debug, Deserialize)]
pub struct ResourcesParams {
    pub lat: f64,
    pub lon: f64,
    /// Search radius in meters.
    pub radius: Option<f64>,
}

pub async fn resources(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Query(params): Query<ResourcesParams>,
) -> Result<Json<Vec<ResourceRecord>>, ApiError> {
    let radius = params.radius.unwrap_or(DEFAULT_RESOURCE_RADIUS_M);
    let hits = state
        .disasters
        .nearby_resources(params.lat, params.lon, radius)
        .await?;
    state
        .events
        .send_resources_updated(serde_json::to_value(&hits)?);
    Ok(Json(hits))
}

#[derive(Debug, Deserialize)]
pub struct VerifyImageRequest {
    pub image_url: String,
}

pub async fn verify_image(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Json(request): Json<VerifyImageRequest>,
) -> Result<Json<Value>, ApiError> {
    let cache_key = format!("verify:{}", request.image_url);
    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let verification = state.verifier.verify(&request.image_url).await?;
    let result = json!({ "verification": verification });
    state.cache.put_background(cache_key, result.clone());
    Ok(Json(result))
}
