//! HTTP UI server
//!
//! Axum-based server hosting the generation page and its JSON endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::session::SessionController;

pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

/// Serve the UI until `shutdown` is cancelled.
///
/// # Arguments
/// * `controller` - Session controller shared by all requests
/// * `server_config` - Bind address and debug/share flags
/// * `generation_timeout` - Caller-side limit for each generation
/// * `shutdown` - Token cancelled on Ctrl+C or SIGTERM
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server(controller: Arc<SessionController>, server_config: &ServerConfig, generation_timeout: Duration, shutdown: CancellationToken) -> Result<()> {
    if server_config.share {
        warn!("⚠️ Public share links are not supported; the UI is only reachable at {}", server_config.bind_addr());
    }

    let state = state::AppState::new(controller, generation_timeout);
    let app = routes::create_router(state, server_config.debug);

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Launching VibeVoice UI on http://{}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown.cancelled_owned()).await.context("Server error")?;

    Ok(())
}
