//! ReliefNet HTTP server.
//!
//! Thin coordination layer between HTTP clients, the record store, the
//! generative-inference and geocoding providers, and connected WebSocket
//! subscribers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod ws;

pub use config::{AppConfig, ConfigError, StoreBackend, load_config};
pub use error::ApiError;
pub use server::{AppState, ReliefnetServer, ServerBuilder, build_app};
