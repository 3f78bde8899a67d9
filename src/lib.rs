//! VibeVoice UI - a browser front-end for VibeVoice text-to-speech.
//!
//! The crate wires a configuration loader, a lazily loaded speech backend
//! with local and remote model providers, and a session controller that turns
//! one UI request into a WAV buffer and a status line. The `server` module
//! serves the page and JSON endpoints over HTTP.

pub mod audio;
pub mod backend;
pub mod config;
pub mod server;
pub mod session;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

/// Initialize logging with a time-only format.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug over info.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();
}
