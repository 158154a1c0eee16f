use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.providers.timeout_ms == 0 {
            return Err("providers.timeout_ms must be > 0".into());
        }
        if self.cache.ttl_secs == 0 {
            return Err("cache.ttl_secs must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.store.backend == StoreBackend::Rest {
            if self.store.url.as_deref().unwrap_or("").is_empty() {
                return Err("store.backend=rest requires store.url".into());
            }
            if self.store.api_key.as_deref().unwrap_or("").is_empty() {
                return Err("store.backend=rest requires store.api_key".into());
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.providers.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Which record/cache store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory store, for local development and tests.
    #[default]
    Memory,
    /// Hosted REST store (PostgREST-style API).
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the hosted store's REST API.
    #[serde(default)]
    pub url: Option<String>,
    /// Service key for the hosted store.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Base URL of the generative-inference API.
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    #[serde(default)]
    pub inference_api_key: String,
    /// Base URL of the geocoding API.
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default)]
    pub geocoding_api_key: String,
    /// Bounded timeout applied to every provider call.
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_inference_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_geocoding_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".into()
}
fn default_provider_timeout_ms() -> u64 {
    10_000
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            inference_url: default_inference_url(),
            inference_api_key: String::new(),
            geocoding_url: default_geocoding_url(),
            geocoding_api_key: String::new(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds until a cached provider result expires.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads the configuration from an optional TOML file, then applies
/// environment overrides and validates.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match path {
        Some(path) if std::path::Path::new(path).exists() => {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_string(),
                source,
            })?
        }
        _ => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg);
    cfg.validate().map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

/// Environment variables take precedence over file values.
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(port) = std::env::var("PORT")
        && let Ok(port) = port.parse::<u16>()
    {
        cfg.server.port = port;
    }
    if let Ok(backend) = std::env::var("RELIEFNET_STORE_BACKEND") {
        match backend.to_ascii_lowercase().as_str() {
            "memory" => cfg.store.backend = StoreBackend::Memory,
            "rest" => cfg.store.backend = StoreBackend::Rest,
            other => tracing::warn!(backend = other, "unrecognized store backend, ignoring"),
        }
    }
    if let Ok(url) = std::env::var("RELIEFNET_STORE_URL") {
        cfg.store.url = Some(url);
    }
    if let Ok(key) = std::env::var("RELIEFNET_STORE_KEY") {
        cfg.store.api_key = Some(key);
    }
    if let Ok(key) = std::env::var("RELIEFNET_INFERENCE_KEY") {
        cfg.providers.inference_api_key = key;
    }
    if let Ok(key) = std::env::var("RELIEFNET_GEOCODING_KEY") {
        cfg.providers.geocoding_api_key = key;
    }
}
