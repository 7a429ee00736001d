//! Unit tests for configuration module
//!
//! Tests configuration parsing, validation, serialization/deserialization,
//! and edge cases in configuration handling.

use super::*;
use anyhow::Result;
use tempfile::tempdir;

#[test]
fn test_default_configuration_is_valid() {
    let config = AuroraConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.registry.base_z_index, 100);
    assert_eq!(config.telemetry.sink, "log");
    assert_eq!(config.telemetry.category, "window");
    assert!(config.window.default_width > 0.0);
    assert!(config.window.default_height > 0.0);
    assert!(config.window.cascade_offset >= 0.0);
}

#[test]
fn test_configuration_serialization_roundtrip() -> Result<()> {
    let original_config = AuroraConfig::default();

    // Serialize to TOML
    let toml_string = toml::to_string(&original_config)?;

    // Deserialize back
    let deserialized_config: AuroraConfig = toml::from_str(&toml_string)?;

    assert_eq!(original_config, deserialized_config);

    Ok(())
}

#[test]
fn test_configuration_from_file() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("test_config.toml");

    let test_config = r#"
[registry]
base_z_index = 250

[window]
default_width = 800.0
default_height = 600.0
default_x = 50.0
default_y = 40.0
cascade_offset = 24.0

[telemetry]
sink = "none"
category = "apps"

[general]
debug = true
"#;

    std::fs::write(&file_path, test_config)?;

    let config = AuroraConfig::load(&file_path)?;
    assert_eq!(config.registry.base_z_index, 250);
    assert_eq!(config.window.default_width, 800.0);
    assert_eq!(config.telemetry.sink, "none");
    assert_eq!(config.telemetry.category, "apps");
    assert!(config.general.debug);

    Ok(())
}

#[test]
fn test_partial_configuration_uses_defaults() -> Result<()> {
    let config: AuroraConfig = toml::from_str(
        r#"
[registry]
base_z_index = 1
"#,
    )?;

    assert_eq!(config.registry.base_z_index, 1);
    assert_eq!(config.telemetry.sink, "log");
    assert_eq!(config.window.default_width, 640.0);

    Ok(())
}

#[test]
fn test_load_missing_file_fails() {
    let result = AuroraConfig::load("/nonexistent/aurora.toml");
    assert!(result.is_err());
}

#[test]
fn test_load_rejects_invalid_sink() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("bad_sink.toml");
    std::fs::write(
        &file_path,
        r#"
[telemetry]
sink = "carrier-pigeon"
"#,
    )?;

    let result = AuroraConfig::load(&file_path);
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_validate_rejects_empty_category() {
    let mut config = AuroraConfig::default();
    config.telemetry.category = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_window_size() {
    let mut config = AuroraConfig::default();
    config.window.default_width = 0.0;
    assert!(config.validate().is_err());

    let mut config = AuroraConfig::default();
    config.window.default_height = -10.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_negative_cascade_offset() {
    let mut config = AuroraConfig::default();
    config.window.cascade_offset = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_save_and_reload() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("saved.toml");

    let mut config = AuroraConfig::default();
    config.registry.base_z_index = 42;
    config.save(&file_path)?;

    let reloaded = AuroraConfig::load(&file_path)?;
    assert_eq!(reloaded, config);

    Ok(())
}
