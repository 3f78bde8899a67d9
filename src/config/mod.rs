//! Configuration module for the VibeVoice UI.
//!
//! Provides CLI argument parsing, the JSON settings file, and the usage policy.

#[allow(clippy::module_inception)]
mod config;
mod guidelines;
mod settings;

pub use config::AppConfig;
pub use guidelines::UsageGuidelines;
pub use settings::{DEFAULT_INFERENCE_STEPS, DEFAULT_MODEL_PATH, STEP_RANGE, ServerConfig, Settings, SettingsError, SettingsOverrides};
