//! VibeVoice UI - serves the text-to-speech generation page.
//!
//! Loads `app/config.json` (or the file given by `--config`), applies
//! command-line overrides, and hosts the UI until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use vibevoice_ui::backend::BackendHandle;
use vibevoice_ui::config::AppConfig;
use vibevoice_ui::server;
use vibevoice_ui::session::SessionController;

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn wait_for_shutdown(shutdown: CancellationToken) {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("🛑 Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => { sigterm.recv().await; }
                    Err(e) => {
                        error!("Failed to register SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("🛑 Received SIGTERM, shutting down...");
        }
    }

    shutdown.cancel();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_args();
    vibevoice_ui::init_logging(config.verbose);

    info!("🎙️ VibeVoice UI v{}", env!("CARGO_PKG_VERSION"));

    // Overrides are applied once here; everything downstream reads this copy
    let settings = Arc::new(config.resolve_settings());
    config.log_config(&settings);

    let backend = BackendHandle::with_default_providers(settings.model_path.clone(), config.local_repo());
    if backend.chain().is_empty() {
        error!("❌ No model provider available. Run 'vibevoice-setup' or set HF_HUB_OFFLINE=0.");
    }

    let controller = Arc::new(SessionController::new(settings.clone(), backend));

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    let served = server::start_server(controller.clone(), &settings.server_config, config.generation_timeout(), shutdown.clone()).await;
    controller.shutdown();

    if let Err(e) = served {
        error!("❌ Failed to launch UI: {:#}", e);
        std::process::exit(1);
    }

    if shutdown.is_cancelled() {
        info!("👋 UI stopped by user");
    }
    Ok(())
}
