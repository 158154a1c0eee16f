//! Tracing initialization with a configurable, runtime-reloadable log level.
//!
//! `RUST_LOG` takes precedence over the configured level, both at
//! initialization and when a level from configuration is applied later.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

static LOG_RELOAD_HANDLE: OnceLock<reload::Handle<EnvFilter, tracing_subscriber::Registry>> =
    OnceLock::new();

pub fn init_tracing() {
    init_tracing_with_level("info");
}

pub fn init_tracing_with_level(level: &str) {
    // Prefer RUST_LOG from env, otherwise use provided level string.
    let base_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let (reload_layer, handle) = reload::Layer::new(base_filter);
    let _ = LOG_RELOAD_HANDLE.set(handle);

    let _ = tracing_subscriber::registry()
        .with(reload_layer)
        .with(fmt::layer())
        .try_init();
}

/// Apply a new logging level at runtime if reload handle is configured.
///
/// A `RUST_LOG` environment filter keeps precedence: the level is only
/// applied when the variable is absent.
pub fn apply_logging_level(level: &str) {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    if let Some(handle) = LOG_RELOAD_HANDLE.get() {
        let _ = handle.modify(|f| {
            *f = EnvFilter::new(level);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test for both phases: the reload handle and RUST_LOG are process
    // globals, so splitting this up would race under the parallel runner.
    #[test]
    fn test_configured_level_applies_unless_rust_log_set() {
        unsafe { std::env::remove_var("RUST_LOG") };
        init_tracing_with_level("info");

        apply_logging_level("warn");
        let handle = LOG_RELOAD_HANDLE.get().unwrap();
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "warn");

        unsafe { std::env::set_var("RUST_LOG", "debug") };
        apply_logging_level("error");
        assert_eq!(handle.with_current(|f| f.to_string()).unwrap(), "warn");
        unsafe { std::env::remove_var("RUST_LOG") };
    }
}
