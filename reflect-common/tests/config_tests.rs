//! Integration tests for config file resolution
//!
//! Tests that touch REFLECT_CONFIG are marked #[serial] so they do not race
//! on the process environment.

use reflect_common::config::{resolve_config_path, CONFIG_ENV_VAR};
use reflect_common::{ConfigOverrides, Error, ServiceConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(content.as_bytes()).expect("Should write config");
    file
}

#[test]
#[serial]
fn test_cli_path_wins_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");

    let resolved = resolve_config_path(Some(Path::new("/from/cli.toml")));
    assert_eq!(resolved.as_deref(), Some(Path::new("/from/cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_path_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved.as_deref(), Some(Path::new("/from/env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_reads_file_values() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config(
        r#"
host = "127.0.0.1"
port = 8123
cors_origins = ["http://localhost:3000", "http://localhost:5173"]
"#,
    );

    let config = ServiceConfig::resolve(ConfigOverrides::default(), Some(file.path()))
        .expect("Should resolve config");

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8123);
    assert_eq!(config.cors_origins.len(), 2);
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_overrides_beat_file_values() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("port = 8123\nlog_level = \"warn\"\n");

    let overrides = ConfigOverrides {
        port: Some(9999),
        ..Default::default()
    };
    let config = ServiceConfig::resolve(overrides, Some(file.path())).unwrap();

    assert_eq!(config.port, 9999);
    assert_eq!(config.log_level, "warn");
}

#[test]
#[serial]
fn test_explicit_missing_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);

    let result = ServiceConfig::resolve(
        ConfigOverrides::default(),
        Some(Path::new("/nonexistent/emotion-reflection/config.toml")),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_malformed_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("port = [not toml");

    let result = ServiceConfig::resolve(ConfigOverrides::default(), Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_env_config_file_is_loaded() {
    let file = write_config("port = 8777\n");
    env::set_var(CONFIG_ENV_VAR, file.path());

    let config = ServiceConfig::resolve(ConfigOverrides::default(), None).unwrap();
    assert_eq!(config.port, 8777);

    env::remove_var(CONFIG_ENV_VAR);
}
