//! Settings file loading, persistence, and command-line overrides.

use clap::Parser;
use tempfile::TempDir;
use vibevoice_ui::config::{AppConfig, DEFAULT_INFERENCE_STEPS, DEFAULT_MODEL_PATH, Settings, SettingsError};

#[test]
fn test_save_then_load_is_identity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app").join("config.json");

    let mut settings = Settings { model_path: "org/custom-model".to_string(), inference_steps: 30, ..Settings::default() };
    settings.server_config.port = 9000;
    settings.server_config.share = false;
    settings.usage_guidelines.guidelines.push("Keep a record of consent".to_string());

    settings.save(&path).unwrap();
    assert_eq!(Settings::load(&path), settings);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(&dir.path().join("absent.json"));

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.model_path, DEFAULT_MODEL_PATH);
    assert_eq!(settings.inference_steps, DEFAULT_INFERENCE_STEPS);
    assert_eq!(settings.server_config.bind_addr(), "0.0.0.0:7860");
}

#[test]
fn test_malformed_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ \"model_path\": ").unwrap();

    assert!(matches!(Settings::try_load(&path), Err(SettingsError::Parse { .. })));
    assert_eq!(Settings::load(&path), Settings::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"inference_steps": 20, "server_config": {"port": 8080}}"#).unwrap();

    let settings = Settings::load(&path);
    assert_eq!(settings.inference_steps, 20);
    assert_eq!(settings.model_path, DEFAULT_MODEL_PATH);
    assert_eq!(settings.server_config.port, 8080);
    assert_eq!(settings.server_config.host, "0.0.0.0");
    assert!(!settings.usage_guidelines.guidelines.is_empty());
}

#[test]
fn test_zero_steps_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"inference_steps": 0}"#).unwrap();

    assert!(matches!(Settings::try_load(&path), Err(SettingsError::Invalid { .. })));
    assert_eq!(Settings::load(&path).inference_steps, DEFAULT_INFERENCE_STEPS);
}

#[test]
fn test_cli_overrides_take_precedence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    Settings { model_path: "org/from-file".to_string(), inference_steps: 12, ..Settings::default() }.save(&path).unwrap();

    let config = AppConfig::try_parse_from(["vibevoice-ui", "--config", path.to_str().unwrap(), "--inference-steps", "25"]).unwrap();
    let settings = config.resolve_settings();
    assert_eq!(settings.inference_steps, 25);
    assert_eq!(settings.model_path, "org/from-file");

    let config = AppConfig::try_parse_from(["vibevoice-ui", "--config", path.to_str().unwrap(), "--model-path", "org/from-cli"]).unwrap();
    let settings = config.resolve_settings();
    assert_eq!(settings.model_path, "org/from-cli");
    assert_eq!(settings.inference_steps, 12);
}

#[test]
fn test_cli_rejects_zero_steps() {
    assert!(AppConfig::try_parse_from(["vibevoice-ui", "--inference-steps", "0"]).is_err());
}
