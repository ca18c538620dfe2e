use picsilfy::config::{Config, ConfigError, ConfigStore};
use std::fs;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("write config");
    (dir, path)
}

#[test]
fn default_values() {
    let config = Config::default();
    assert_eq!(
        config.api.base_url,
        "https://playground-021-backend.vercel.app"
    );
    assert_eq!(config.search.debounce_ms, 500);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.notice_ms, 3000);
    assert_eq!(config.ui.redirect_ms, 1500);
    assert!(config.validate().is_ok());
}

#[test]
fn config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("picsilfy/config.toml"));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let (_dir, path) = write_config("[search]\ndebounce_ms = 200\n");
    let config = Config::load_from(&path).expect("load");
    assert_eq!(config.search.debounce_ms, 200);
    assert_eq!(config.api, Config::default().api);
    assert_eq!(config.ui, Config::default().ui);
}

#[test]
fn full_file_round_trips_through_toml() {
    let (_dir, path) = write_config(
        r#"
[api]
base_url = "http://localhost:5000"

[search]
debounce_ms = 300

[ui]
tick_rate_ms = 100
notice_ms = 2000
redirect_ms = 1000
"#,
    );
    let config = Config::load_from(&path).expect("load");
    assert_eq!(config.api.base_url, "http://localhost:5000");
    assert_eq!(config.ui.tick_rate_ms, 100);
    assert_eq!(config.ui.redirect_ms, 1000);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let (_dir, path) = write_config("[api\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn non_http_base_url_fails_validation() {
    let (_dir, path) = write_config("[api]\nbase_url = \"localhost:5000\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("base_url"));
}

#[test]
fn zero_tick_rate_fails_validation() {
    let mut config = Config::default();
    config.ui.tick_rate_ms = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tick_rate_ms"));
}

#[test]
fn failed_reload_keeps_previous_config() {
    let (_dir, path) = write_config("[search]\ndebounce_ms = 200\n");
    let store = ConfigStore::new(Config::load_from(&path).expect("load"), path.clone());

    fs::write(&path, "[search]\ndebounce_ms = 0\n").expect("rewrite");
    assert!(store.reload().is_err());
    assert_eq!(store.get().search.debounce_ms, 200);

    fs::write(&path, "[search]\ndebounce_ms = 800\n").expect("rewrite");
    store.reload().expect("reload");
    assert_eq!(store.get().search.debounce_ms, 800);
}
