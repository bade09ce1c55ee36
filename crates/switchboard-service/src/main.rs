//! Switchboard service entry point.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize structured logging (tracing)
//! 3. Build the companion client when `COMPANION_URL` is set
//! 4. Build the resolver context (store + broadcaster)
//! 5. Serve HTTP until Ctrl-C, then shut the broadcaster down so open
//!    `WebSocket` streams end

use std::sync::Arc;

use switchboard_broadcast::Broadcaster;
use switchboard_service::{
    AppState, CompanionClient, HttpCompanionClient, Resolvers, ServiceConfig, logging,
    package_info, start_server,
};
use tracing::{info, warn};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails to
/// bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = ServiceConfig::from_env()?;

    // 2. Initialize structured logging.
    logging::init(config.log_format);

    let info = package_info();
    info!(
        service = %config.service_id,
        id = %info.id,
        host = %config.server.host,
        port = config.server.port,
        queue_capacity = config.broadcast.queue_capacity.map(core::num::NonZeroUsize::get),
        overflow = %config.broadcast.overflow,
        "Configuration loaded"
    );

    // 3. Companion client.
    let client = match config.companion_url.as_deref() {
        Some(url) => {
            let client = HttpCompanionClient::new(url, config.companion_timeout)?;
            info!(url, "Companion client configured");
            Some(CompanionClient::Http(client))
        }
        None => {
            info!("No companion configured");
            None
        }
    };

    // 4. Resolver context.
    let resolvers = Resolvers::new(info, config.service_id.clone())
        .with_broadcaster(Broadcaster::with_config(config.broadcast))
        .with_client(client);
    let state = Arc::new(AppState::new(resolvers.clone()));

    // 5. Serve until Ctrl-C.
    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        }
        let closed = resolvers.shutdown();
        info!(closed_subscriptions = closed, "Shutdown signal received");
    };

    start_server(&config.server, state, shutdown).await?;

    Ok(())
}
