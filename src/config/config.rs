//! Command-line surface and settings resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::info;

use super::settings::{STEP_RANGE, Settings, SettingsOverrides};

/// VibeVoice UI launcher configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "vibevoice-ui")]
#[command(author, version, about = "Launch the VibeVoice speech generation UI", long_about = None)]
pub struct AppConfig {
    /// Configuration file path
    #[arg(long, default_value = "app/config.json")]
    pub config: PathBuf,

    /// Override model path from config
    #[arg(long)]
    pub model_path: Option<String>,

    /// Override inference steps from config
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub inference_steps: Option<u32>,

    /// Local VibeVoice package checkout (enables the offline provider when present)
    #[arg(long, env = "VIBEVOICE_LOCAL_REPO", default_value = "VibeVoice")]
    pub local_repo: PathBuf,

    /// Seconds a single generation may run before it is reported as timed out
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Command-line overrides to apply on top of the settings file.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides { model_path: self.model_path.clone(), inference_steps: self.inference_steps }
    }

    /// Load the settings file and apply command-line overrides.
    ///
    /// This is the only place overrides are applied; callers share the result
    /// read-only from then on.
    pub fn resolve_settings(&self) -> Settings {
        let settings = Settings::load(&self.config);
        self.overrides().apply(settings)
    }

    /// Caller-side synthesis timeout.
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory probed by the local provider.
    pub fn local_repo(&self) -> &Path {
        &self.local_repo
    }

    /// Log the effective configuration.
    pub fn log_config(&self, settings: &Settings) {
        info!("Configuration:");
        info!("  Config file: {}", self.config.display());
        info!("  Model: {}", settings.model_path);
        info!("  Inference steps: {} (UI range {}-{})", settings.inference_steps, STEP_RANGE.start(), STEP_RANGE.end());
        info!("  Local package: {}", self.local_repo.display());
        info!("  Generation timeout: {}s", self.timeout_secs);
        info!("  Server: {} (debug: {}, share: {})", settings.server_config.bind_addr(), settings.server_config.debug, settings.server_config.share);
    }
}
