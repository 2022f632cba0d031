use std::fs;

use taskr_core::config::{DEFAULT_TASKS_FILE, ENV_TASKS_FILE};
use taskr_core::{Config, ConfigError, FileStorage};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.storage.file, DEFAULT_TASKS_FILE);
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[storage]
file = "/tmp/custom-tasks.txt"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.storage.file, "/tmp/custom-tasks.txt");
}

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("taskr.toml");
    fs::write(&path, "[storage]\nfile = \"work.txt\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    // The environment may still point elsewhere.
    if std::env::var(ENV_TASKS_FILE).is_err() {
        assert_eq!(config.storage.file, "work.txt");
    }

    let storage = FileStorage::with_config(&config.storage);
    assert_eq!(storage.path(), config.storage.file_path());
}

#[test]
fn test_missing_config_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("taskr.toml");
    fs::write(&path, "[storage\nfile = 3").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_round_trip_through_toml() {
    let config = Config::default();
    let parsed: Config = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(parsed, config);
}
