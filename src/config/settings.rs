//! File-backed run-time settings (`app/config.json`).
//!
//! Loading never fails: a missing or malformed file falls back to the built-in
//! defaults, and keys absent from an otherwise valid file take their default.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::guidelines::UsageGuidelines;

/// Model loaded when neither the file nor the command line names one.
pub const DEFAULT_MODEL_PATH: &str = "microsoft/VibeVoice-1.5B";

/// Default number of inference steps.
pub const DEFAULT_INFERENCE_STEPS: u32 = 10;

/// Step range offered by the UI slider.
pub const STEP_RANGE: RangeInclusive<u32> = 5..=50;

/// Failure to read or parse a settings file (`ConfigUnreadable`).
///
/// Only surfaced by [`Settings::try_load`] and [`Settings::save`]; [`Settings::load`]
/// recovers from it locally.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("cannot parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("invalid setting in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// HTTP bind parameters for the UI server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub share: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 7860, debug: true, share: true }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Immutable-once-loaded application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model identifier: a hub repository id or a local directory.
    pub model_path: String,
    pub inference_steps: u32,
    pub server_config: ServerConfig,
    pub usage_guidelines: UsageGuidelines,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            inference_steps: DEFAULT_INFERENCE_STEPS,
            server_config: ServerConfig::default(),
            usage_guidelines: UsageGuidelines::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults on any failure.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON settings file
    ///
    /// # Returns
    /// The loaded settings, or [`Settings::default`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                info!("✅ Configuration loaded from {}", path.display());
                settings
            }
            Err(SettingsError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                warn!("⚠️ Config file not found: {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("⚠️ {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`, reporting why the file could not be used.
    ///
    /// # Errors
    /// Returns [`SettingsError`] if the file cannot be read, is not valid JSON, or
    /// carries an `inference_steps` of zero.
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read { path: path.to_path_buf(), source })?;
        let settings: Settings = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })?;

        if settings.inference_steps == 0 {
            return Err(SettingsError::Invalid { path: path.to_path_buf(), reason: "inference_steps must be positive".to_string() });
        }

        Ok(settings)
    }

    /// Write settings as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    /// Returns [`SettingsError::Write`] if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source: std::io::Error| SettingsError::Write { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(std::io::Error::other(e)))?;
        fs::write(path, json).map_err(write_err)?;

        info!("Configuration written to {}", path.display());
        Ok(())
    }
}

/// Command-line replacements for loaded settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub model_path: Option<String>,
    pub inference_steps: Option<u32>,
}

impl SettingsOverrides {
    /// Apply the overrides, consuming both the overrides and the loaded settings.
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(model_path) = self.model_path {
            info!("Model path overridden: {}", model_path);
            settings.model_path = model_path;
        }
        if let Some(steps) = self.inference_steps.filter(|s| *s > 0) {
            info!("Inference steps overridden: {}", steps);
            settings.inference_steps = steps;
        }
        settings
    }
}
