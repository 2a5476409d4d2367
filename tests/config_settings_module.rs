use orgmap::config::{
    bootstrap_state_root, default_global_config_path, load_global_settings, load_settings_from,
    save_global_settings, save_settings_to, ConfigError, Settings, StatePaths, StoreBackend,
};
use orgmap::persistence::DEFAULT_STORE_KEY;
use orgmap::wizard::WizardLayout;
use std::ffi::OsString;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct HomeGuard {
    previous: Option<OsString>,
}

impl HomeGuard {
    fn set(path: &std::path::Path) -> Self {
        let previous = std::env::var_os("HOME");
        std::env::set_var("HOME", path);
        Self { previous }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var("HOME", value),
            None => std::env::remove_var("HOME"),
        }
    }
}

#[test]
fn config_settings_default_when_file_missing() {
    let temp = tempdir().expect("tempdir");
    let settings = load_settings_from(&temp.path().join("config.yaml")).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.layout, WizardLayout::Full);
    assert_eq!(settings.store.backend, StoreBackend::File);
    assert_eq!(settings.store.key, DEFAULT_STORE_KEY);
    assert!(settings.catalog_path.is_none());
}

#[test]
fn config_settings_parse_yaml_and_reject_unknown_fields() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("config.yaml");
    fs::write(
        &path,
        "layout: compact\nstore:\n  backend: sqlite\n  key: team.maps\n",
    )
    .expect("write");
    let settings = load_settings_from(&path).expect("parse");
    assert_eq!(settings.layout, WizardLayout::Compact);
    assert_eq!(settings.store.backend, StoreBackend::Sqlite);
    assert_eq!(settings.store.key, "team.maps");

    fs::write(&path, "layout: full\nworkspaces_path: /tmp\n").expect("write");
    let err = load_settings_from(&path).expect_err("unknown field");
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn config_settings_validate_store_key_and_catalog_path() {
    let temp = tempdir().expect("tempdir");
    let mut settings = Settings::default();
    settings.store.key = "../escape".to_string();
    let err = settings.validate().expect_err("bad key");
    assert!(err.to_string().contains("store.key"), "{err}");

    let mut settings = Settings::default();
    settings.catalog_path = Some(temp.path().join("missing.yaml"));
    let err = settings.validate().expect_err("missing catalog");
    assert!(err.to_string().contains("does not exist"), "{err}");
}

#[test]
fn config_settings_round_trip_through_save() {
    let temp = tempdir().expect("tempdir");
    let catalog = temp.path().join("catalog.yaml");
    fs::write(&catalog, "OrgList: [Acme]\n").expect("catalog");
    let path = temp.path().join("nested/config.yaml");
    let mut settings = Settings::default();
    settings.layout = WizardLayout::Minimal;
    settings.catalog_path = Some(catalog.clone());
    settings.store.backend = StoreBackend::Memory;

    save_settings_to(&path, &settings).expect("save");
    assert_eq!(load_settings_from(&path).expect("load"), settings);
}

#[test]
fn config_settings_global_paths_follow_home() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let temp = tempdir().expect("tempdir");
    let _home = HomeGuard::set(temp.path());

    let config_path = default_global_config_path().expect("config path");
    assert_eq!(config_path, temp.path().join(".orgmap/config.yaml"));
    assert_eq!(load_global_settings().expect("defaults"), Settings::default());

    let written = save_global_settings(&Settings::default()).expect("save global");
    assert_eq!(written, config_path);
    assert!(config_path.is_file());
}

#[test]
fn config_state_paths_bootstrap_required_directories() {
    let temp = tempdir().expect("tempdir");
    let paths = StatePaths::new(temp.path().join(".orgmap"));
    bootstrap_state_root(&paths).expect("bootstrap");
    assert!(paths.store_dir().is_dir());
    assert!(paths.logs_dir().is_dir());
    assert_eq!(paths.log_path(), paths.root.join("logs/orgmap.log"));
    assert_eq!(paths.sqlite_path(), paths.root.join("orgmap.db"));
}
