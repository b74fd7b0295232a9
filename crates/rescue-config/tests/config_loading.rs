//! Layered loading: defaults, TOML file and environment overrides

use std::{env, fs, path::PathBuf};

use rescue_config::{ClassifierProvider, ConfigError, ConfigManager, DispatchConfig};
use serial_test::serial;
use tempfile::TempDir;

fn manager_in(dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("rescue.toml"))
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = manager_in(&dir).load_config().unwrap();
    assert_eq!(config, DispatchConfig::default());
    assert_eq!(config.location.default_location, "chennai general");
    assert_eq!(config.batch.request_interval_ms, 50);
}

#[test]
#[serial]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rescue.toml"),
        r#"
[classifier]
provider = "keyword"

[location]
fuzzy_threshold = 90.0

[paths]
resources = "data/resources.csv"
"#,
    )
    .unwrap();

    let config = manager_in(&dir).load_config().unwrap();
    assert_eq!(config.classifier.provider, ClassifierProvider::Keyword);
    assert_eq!(config.location.fuzzy_threshold, 90.0);
    assert_eq!(config.location.default_latitude, 13.0827);
    assert_eq!(
        config.paths.resources,
        Some(PathBuf::from("data/resources.csv"))
    );
    assert_eq!(config.batch.concurrency, 1);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rescue.toml"), "[batch]\nconcurrency = 2\n").unwrap();

    env::set_var("RESCUE_BATCH__CONCURRENCY", "6");
    let result = manager_in(&dir).load_config();
    env::remove_var("RESCUE_BATCH__CONCURRENCY");

    assert_eq!(result.unwrap().batch.concurrency, 6);
}

#[test]
#[serial]
fn test_invalid_file_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rescue.toml"), "[batch]\nconcurrency = 0\n").unwrap();

    let result = manager_in(&dir).load_config();
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
#[serial]
fn test_token_read_from_named_variable() {
    let mut config = DispatchConfig::default();
    config.classifier.token_env = "RESCUE_TEST_TOKEN".to_string();

    env::remove_var("RESCUE_TEST_TOKEN");
    assert_eq!(config.classifier.token(), None);

    env::set_var("RESCUE_TEST_TOKEN", "  hf_abc  ");
    assert_eq!(config.classifier.token().as_deref(), Some("hf_abc"));
    env::remove_var("RESCUE_TEST_TOKEN");
}

#[test]
#[serial]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir);

    manager.init_config(false).unwrap();
    assert!(manager.config_path().exists());

    let again = manager.init_config(false);
    assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));

    manager.init_config(true).unwrap();
    assert_eq!(manager.load_config().unwrap(), DispatchConfig::default());
}
