use albedo::api::{AppState, ReflectorServer};
use albedo::capabilities::CapabilitiesCache;
use albedo::config::{Cli, ServerConfig};
use albedo::logging;
use albedo::reflection::EndpointRegistry;
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = ServerConfig::try_from(&cli)?;
    logging::init(config.log_level, config.log_format)?;

    // Fail at startup rather than on the first /capabilities request
    let capabilities = Arc::new(CapabilitiesCache::new());
    capabilities
        .get()
        .context("Built-in capabilities descriptor is invalid")?;

    let state = Arc::new(AppState::new(
        Arc::new(EndpointRegistry::new()),
        capabilities,
    ));
    let server = ReflectorServer::bind(config.addr, state)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    server.run_until(shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
