//! Config loading exercised against the repository's real config.toml.

use std::path::PathBuf;

use cragkiosk_core::Config;

/// The repo root, two levels above this crate's manifest.
fn repo_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("config.toml")
}

#[test]
fn test_shipped_config_loads_and_validates() {
    let config = Config::load(&repo_config()).expect("config.toml should load");
    config.validate().expect("config.toml should be valid");

    assert!(config.window.width > 0);
    assert!(config.window.height > 0);
    assert!(!config.nav.home_page.is_empty());
    // The hamburger takes over well before the dashboard panels collapse.
    assert!(config.nav.mobile_breakpoint > config.dashboard.collapse_breakpoint);
}

#[test]
fn test_shipped_config_summary_lists_every_section() {
    let config = Config::load(&repo_config()).unwrap();
    let summary = config.summary();

    for heading in ["Window:", "Theme:", "Navigation:", "Notices:", "size:"] {
        assert!(summary.contains(heading), "summary is missing {heading}");
    }
}

#[test]
fn test_find_and_load_with_explicit_path() {
    let path = repo_config();
    let loaded = Config::find_and_load(Some(&path)).unwrap();

    assert!(!loaded.used_defaults);
    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    loaded.config.validate().unwrap();
}

#[test]
fn test_explicit_missing_path_is_an_error() {
    let missing = PathBuf::from("/nonexistent/cragkiosk/config.toml");
    assert!(Config::find_and_load(Some(&missing)).is_err());
}

#[test]
fn test_unparseable_file_is_an_error_not_a_fallback() {
    let dir = std::env::temp_dir().join("cragkiosk_broken_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "not toml at all {{{{\n").unwrap();

    assert!(Config::load(&path).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_partial_user_file_keeps_other_defaults() {
    let dir = std::env::temp_dir().join("cragkiosk_partial_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[window]\ntitle = \"Boulderhalle Ost\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.window.title, "Boulderhalle Ost");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.nav.home_page, "index");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_validation_failures_name_the_field() {
    let toml = r#"
        [notices]
        timeout_ms = 0

        [theme]
        accent = "chartreuse"
    "#;

    let config: Config = toml::from_str(toml).unwrap();
    let err = config.validate().unwrap_err().to_string();

    assert!(err.contains("notices.timeout_ms"));
    assert!(err.contains("theme.accent"));
}
