use reliefnet_server::config::load_config;
use reliefnet_server::observability::{apply_logging_level, init_tracing};
use reliefnet_server::server::ServerBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up provider keys.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config_path = resolve_config_path();
    let cfg = load_config(config_path.as_deref())?;
    apply_logging_level(&cfg.logging.level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %cfg.addr(),
        "starting ReliefNet server"
    );

    ServerBuilder::new().with_config(cfg).build()?.run().await
}

/// `--config <path>` beats `RELIEFNET_CONFIG`, which beats the default
/// `reliefnet.toml` in the working directory.
fn resolve_config_path() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next();
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    if let Ok(path) = std::env::var("RELIEFNET_CONFIG") {
        return Some(path);
    }
    Some("reliefnet.toml".to_string())
}
