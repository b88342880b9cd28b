use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use saldo::application::LedgerService;
use saldo::config::Config;
use saldo::http;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env();

    let service = LedgerService::init(&config.database_url)
        .await
        .context("Failed to open the ledger database")?;
    let service = Arc::new(service);

    let app = http::build_router(service.clone());

    let listener = tokio::net::TcpListener::bind(&config.listen_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_address))?;
    tracing::info!(address = %config.listen_address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    service.close().await;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
