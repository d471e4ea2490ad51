use super::*;
use tempfile::TempDir;

#[test]
fn test_load_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = AppConfig::load(&AppConfig::path(temp.path())).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.api.base_url, "http://localhost:5000");
    assert_eq!(config.records.max_samples_per_record, 3);
    assert_eq!(config.user.name, None);
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = AppConfig::path(temp.path());

    let mut config = AppConfig::default();
    config.api.base_url = "http://lab-server:8080".to_string();
    config.user.name = Some("dana".to_string());
    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = AppConfig::path(temp.path());
    std::fs::write(&path, "[api]\nbase_url = \"http://x\"\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.api.base_url, "http://x");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.health.poll_interval_secs, 30);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = AppConfig::path(temp.path());
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let result = AppConfig::load(&path);
    assert!(matches!(result, Err(AppConfigError::Parse(_))));
}

#[test]
fn test_validate_reports_zero_values() {
    let mut config = AppConfig::default();
    assert!(config.validate().is_empty());

    config.api.timeout_secs = 0;
    config.records.max_samples_per_record = 0;
    config.api.base_url = "  ".to_string();

    let errors = config.validate();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e.contains("timeout_secs")));
}

#[test]
fn test_with_defaults_for_invalid_repairs() {
    let mut config = AppConfig::default();
    config.api.timeout_secs = 0;
    config.health.poll_interval_secs = 0;
    config.user.name = Some("kim".to_string());

    let repaired = config.with_defaults_for_invalid();
    assert!(repaired.validate().is_empty());
    assert_eq!(repaired.api.timeout_secs, 10);
    assert_eq!(repaired.user.name.as_deref(), Some("kim"));
}
