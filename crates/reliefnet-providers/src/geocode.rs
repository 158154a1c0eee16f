//! Geocoding adapter: place name to coordinates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use reliefnet_core::GeoPoint;

use crate::error::ProviderError;
use crate::traits::Geolocator;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the geocoding provider.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// API base URL, e.g. `https://maps.googleapis.com/maps/api/geocode`.
    pub base_url: String,
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GeocodeConfig {
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

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    lat: f64,
    lng: f64,
}

/// Client for a hosted geocoding API.
///
/// Takes the first candidate unconditionally; there is no disambiguation.
/// Zero candidates is a typed [`ProviderError::NoLocationFound`] rather than
/// an index fault.
pub struct GeocodeClient {
    http: Client,
    config: GeocodeConfig,
}

impl GeocodeClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::request(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Geolocator for GeocodeClient {
    async fn resolve(&self, place: &str) -> Result<GeoPoint, ProviderError> {
        let url = format!("{}/json", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[("address", place), ("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::unexpected_status(status.as_u16(), body));
        }

        let decoded: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        decoded
            .results
            .into_iter()
            .next()
            .map(|candidate| {
                GeoPoint::new(candidate.geometry.location.lat, candidate.geometry.location.lng)
            })
            .ok_or_else(|| ProviderError::no_location_found(place))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeocodeClient {
        GeocodeClient::new(GeocodeConfig::new(server.uri(), "maps-key")).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_takes_first_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .and(query_param("address", "Manhattan, NYC"))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    { "geometry": { "location": { "lat": 40.7831, "lng": -73.9712 } } },
                    { "geometry": { "location": { "lat": 0.0, "lng": 0.0 } } }
                ]
            })))
            .mount(&server)
            .await;

        let point = client(&server).resolve("Manhattan, NYC").await.unwrap();
        assert_eq!(point, GeoPoint::new(40.7831, -73.9712));
    }

    #[tokio::test]
    async fn test_resolve_zero_results_is_no_location_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&server)
            .await;

        let err = client(&server).resolve("Atlantis").await.unwrap_err();
        assert!(err.is_no_location());
        assert!(err.to_string().contains("Atlantis"));
    }

    #[tokio::test]
    async fn test_resolve_non_success_status_is_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&server)
            .await;

        let err = client(&server).resolve("anywhere").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedStatus { status: 500, .. }));
    }
}
