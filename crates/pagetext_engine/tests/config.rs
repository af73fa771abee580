use std::fs;

use pagetext_engine::{load_overrides, ConfigLoadError};
use tempfile::tempdir;

#[test]
fn missing_config_means_no_overrides() {
    let temp = tempdir().expect("tempdir");
    let overrides = load_overrides(&temp.path().join("config.json")).expect("missing is fine");
    assert!(overrides.is_empty());
}

#[test]
fn loads_override_records() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.json");
    fs::write(
        &path,
        r#"[{"hosts": ["habr.com"], "content_tag": "div", "word_wrap_column": 60}]"#,
    )
    .expect("write config");

    let overrides = load_overrides(&path).expect("valid config");
    assert_eq!(overrides.len(), 1);
    assert!(overrides[0].matches("habr.com"));
    assert!(!overrides[0].matches("example.com"));
}

#[test]
fn malformed_config_is_reported_with_its_path() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.json");
    fs::write(&path, "{ not json").expect("write config");

    match load_overrides(&path) {
        Err(ConfigLoadError::Invalid { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected invalid config error, got {other:?}"),
    }
}
