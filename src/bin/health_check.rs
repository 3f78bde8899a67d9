//! Liveness probe for a running VibeVoice UI.
//!
//! Exits 0 when `GET {url}/` answers 200, 1 otherwise.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "health-check", version, about = "Check that the VibeVoice UI is serving")]
struct Args {
    /// Base URL of the UI
    #[arg(long, default_value = "http://localhost:7860")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn check_health(url: &str, timeout: Duration) -> bool {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to build HTTP client: {}", e);
            return false;
        }
    };

    let target = format!("{}/", url.trim_end_matches('/'));
    match client.get(&target).send() {
        Ok(response) if response.status() == reqwest::StatusCode::OK => {
            info!("✅ VibeVoice UI is healthy");
            true
        }
        Ok(response) => {
            error!("❌ VibeVoice UI returned status code: {}", response.status().as_u16());
            false
        }
        Err(e) => {
            error!("❌ VibeVoice UI health check failed: {}", e);
            false
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    vibevoice_ui::init_logging(args.verbose);

    if check_health(&args.url, Duration::from_secs(args.timeout_secs)) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
