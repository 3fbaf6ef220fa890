//! Integration tests for config parsing against the real config.toml.

use std::fs;
use std::path::PathBuf;

use folio_core::{EngineConfig, Error};

fn project_root() -> PathBuf {
    // Navigate from crates/folio-core/ up to project root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_load_real_config() {
    let config_path = project_root().join("config.toml");
    let config = EngineConfig::load(&config_path).expect("Failed to load config.toml");

    assert!(config.history.max_entries >= 2);
    assert!(!config.persistence.key.is_empty());
}

#[test]
fn test_real_config_validates() {
    let config_path = project_root().join("config.toml");
    let config = EngineConfig::load(&config_path).unwrap();
    config.validate().expect("Real config.toml should be valid");
    assert!(config.warnings().is_empty());
}

#[test]
fn test_user_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [history]
        debounce_ms = 250

        [randomizer]
        seed = 7
        "#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.history.debounce_ms, 250);
    assert_eq!(config.history.max_entries, 6);
    assert_eq!(config.randomizer.seed, Some(7));
    assert!(config.render.transparent_for_starfield);
}

#[test]
fn test_explicit_missing_path_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = EngineConfig::find_and_load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(p) if p == path));
}

#[test]
fn test_explicit_path_is_strict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[history]\nmax_entries = \"six\"\n").unwrap();

    let err = EngineConfig::find_and_load(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_explicit_path_reports_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[persistence]\nenabled = true\n").unwrap();

    let result = EngineConfig::find_and_load(Some(&path)).unwrap();
    assert_eq!(result.source.as_deref(), Some(path.as_path()));
    assert!(!result.used_defaults);
    assert!(result.config.persistence.enabled);
}

#[test]
fn test_validation_errors_are_listed() {
    let config = EngineConfig::load_with_defaults(
        r#"
        [history]
        max_entries = 0

        [persistence]
        key = "a/b"
        "#,
    )
    .unwrap();

    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("history.max_entries"));
    assert!(message.contains("persistence.key"));
}
