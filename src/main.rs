//! NotePortal API Server
//!
//! Run with: cargo run --bin noteportal
//!
//! # Configuration
//!
//! Config file (first found): `~/.config/noteportal/config.toml`,
//! `/etc/noteportal/config.toml`, `./config.toml`. Environment variables
//! override the file:
//! - `NOTEPORTAL_RPC_URL`: Wallet node URL (empty = no wallet)
//! - `NOTEPORTAL_CONTRACT`: Portal contract address
//! - `NOTEPORTAL_KIND`: `note` or `wave`
//! - `NOTEPORTAL_GAS_LIMIT`: Gas-limit override for submissions
//! - `NOTEPORTAL_API_HOST` / `NOTEPORTAL_API_PORT`: Bind address
//! - `NOTEPORTAL_LOG_LEVEL` / `NOTEPORTAL_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Takes precedence over the configured level

use noteportal::api::{serve, AppState};
use noteportal::config::{Config, LoggingConfig};
use noteportal::portal::{Backend, RpcPortal, SubmissionClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_logging(&config.logging);

    tracing::info!("Starting NotePortal API server v{}", env!("CARGO_PKG_VERSION"));

    let backend = match config.rpc_config()? {
        Some(rpc_config) => {
            tracing::info!(
                rpc_url = %rpc_config.rpc_url,
                contract = %rpc_config.contract,
                kind = %rpc_config.kind,
                "Wallet provider configured"
            );
            let portal = Arc::new(RpcPortal::connect(rpc_config)?);
            Some(Backend::shared(portal))
        }
        None => {
            tracing::warn!("No wallet provider configured; reads and writes are disabled");
            None
        }
    };

    let client_config = config.client_config();
    tracing::info!(gas_limit = ?client_config.gas_limit, "Write path configured");

    let client = Arc::new(SubmissionClient::new(backend, client_config));

    // Silent check on load, like a page opening with an injected wallet
    let account = client.check_silently().await;
    tracing::info!(account = %account, "Wallet session initialized");

    let server_config = config.server_config();
    let state = AppState::new(client, server_config.clone());
    serve(state, &server_config).await?;

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("noteportal={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
