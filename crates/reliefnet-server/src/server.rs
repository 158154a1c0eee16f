use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use reliefnet_core::EventBroadcaster;
use reliefnet_db_memory::InMemoryStore;
use reliefnet_db_rest::{RestStore, RestStoreConfig};
use reliefnet_providers::{
    GenAiClient, GenAiConfig, GeocodeClient, GeocodeConfig, Geolocator, ImageVerifier,
    LocationExtractor,
};
use reliefnet_storage::{CacheStore, DisasterStore, MemoCache};

use crate::config::{AppConfig, StoreBackend};
use crate::{handlers, ws};

/// Constructed dependencies injected into every handler. No ambient globals;
/// tests assemble their own state around the in-memory backend.
#[derive(Clone)]
pub struct AppState {
    pub disasters: Arc<dyn DisasterStore>,
    pub cache: MemoCache,
    pub extractor: Arc<dyn LocationExtractor>,
    pub verifier: Arc<dyn ImageVerifier>,
    pub geolocator: Arc<dyn Geolocator>,
    pub events: EventBroadcaster,
}

pub fn build_app(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        // Disaster CRUD
        .route(
            "/disasters",
            get(handlers::list_disasters).post(handlers::create_disaster),
        )
        .route(
            "/disasters/{id}",
            axum::routing::put(handlers::update_disaster).delete(handlers::delete_disaster),
        )
        // Provider proxies and observation endpoints
        .route("/geocode", post(handlers::geocode))
        .route("/disasters/{id}/social-media", get(handlers::social_media))
        .route("/disasters/{id}/resources", get(handlers::resources))
        .route("/disasters/{id}/verify-image", post(handlers::verify_image))
        // Change-notification push channel
        .route("/ws", get(ws::ws_handler))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub struct ServerBuilder {
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.config = cfg;
        self
    }

    /// Wires the configured backends and providers into a runnable server.
    pub fn build(self) -> anyhow::Result<ReliefnetServer> {
        let cfg = self.config;
        let timeout = cfg.provider_timeout();

        let (disasters, cache_store): (Arc<dyn DisasterStore>, Arc<dyn CacheStore>) =
            match cfg.store.backend {
                StoreBackend::Memory => {
                    let store = Arc::new(InMemoryStore::new());
                    (store.clone(), store)
                }
                StoreBackend::Rest => {
                    let url = cfg.store.url.clone().unwrap_or_default();
                    let api_key = cfg.store.api_key.clone().unwrap_or_default();
                    let store = Arc::new(RestStore::new(
                        RestStoreConfig::new(url, api_key).with_timeout(timeout),
                    )?);
                    (store.clone(), store)
                }
            };
        tracing::info!(backend = disasters.backend_name(), "record store ready");

        let genai = Arc::new(GenAiClient::new(
            GenAiConfig::new(
                cfg.providers.inference_url.clone(),
                cfg.providers.inference_api_key.clone(),
            )
            .with_timeout(timeout),
        )?);
        let geolocator = Arc::new(GeocodeClient::new(
            GeocodeConfig::new(
                cfg.providers.geocoding_url.clone(),
                cfg.providers.geocoding_api_key.clone(),
            )
            .with_timeout(timeout),
        )?);

        let state = AppState {
            disasters,
            cache: MemoCache::with_ttl(cache_store, cfg.cache_ttl()),
            extractor: genai.clone(),
            verifier: genai,
            geolocator,
            events: EventBroadcaster::new(),
        };

        let addr = cfg.addr();
        let app = build_app(state, &cfg);

        Ok(ReliefnetServer { addr, app })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ReliefnetServer {
    addr: SocketAddr,
    app: Router,
}

impl ReliefnetServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
