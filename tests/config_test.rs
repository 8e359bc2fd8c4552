use std::path::Path;

use release_board::config::loader::{load_config, parse_config_file, state_path};
use release_board::config::types::AppConfig;

#[test]
fn parse_minimal_config() {
    let toml = r#"
[backend]
base_url = "https://board.example.com/api"
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.backend.base_url, "https://board.example.com/api");
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.defaults.page_size, 10);
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[defaults]
page_size = 25
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.defaults.page_size, 25);
}

#[test]
fn parse_defaults() {
    let toml = r#"
[defaults]
page_size = 20
releases_per_page = 500
category_per_page = 25
date_format = "relative"
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.defaults.page_size, 20);
    assert_eq!(config.defaults.releases_per_page, 500);
    assert_eq!(config.defaults.category_per_page, 25);
    assert_eq!(config.defaults.date_format, "relative");
}

#[test]
fn parse_state_section() {
    let toml = r#"
[state]
path = "/tmp/board-state.json"
persist_raw = false
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert!(!config.state.persist_raw);
    assert_eq!(
        state_path(&config).as_deref(),
        Some(Path::new("/tmp/board-state.json"))
    );
}

#[test]
fn empty_config_uses_builtin_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config.backend.base_url, "http://127.0.0.1:5000/api");
    assert_eq!(config.defaults.releases_per_page, 2000);
    assert_eq!(config.defaults.category_per_page, 50);
    assert!(config.state.persist_raw);
    assert!(config.state.path.is_none());
}

#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[backend]\ntimeout_secs = 5\n").unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.backend.timeout_secs, 5);
}

#[test]
fn missing_explicit_path_is_an_error() {
    let err = load_config(Some(Path::new("/nonexistent/release-board.toml"))).unwrap_err();
    assert!(format!("{err:#}").contains("reading /nonexistent/release-board.toml"));
}

#[test]
fn invalid_toml_reports_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[backend\nbase_url = 1").unwrap();

    let err = parse_config_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing TOML"));
}

#[test]
fn wrong_value_type_is_rejected() {
    let toml = r#"
[defaults]
page_size = "ten"
"#;
    assert!(toml::from_str::<AppConfig>(toml).is_err());
}
