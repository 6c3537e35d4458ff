//! Tests for config module

use std::io::Write;
use std::path::Path;

use asgard_trends::config::Config;
use asgard_trends::source::SourceMode;
use serial_test::serial;
use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "ASGARD_TRENDS_MODE",
    "ASGARD_ENV",
    "ASGARD_INTERPRETER",
    "ASGARD_SCRIPT_PATH",
    "ASGARD_ANALYSIS_TIMEOUT",
    "ASGARD_MAX_OUTPUT_BYTES",
    "ASGARD_MAX_CONCURRENT_RUNS",
    "ASGARD_HOST",
    "ASGARD_PORT",
    "ASGARD_LOG_LEVEL",
    "ASGARD_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_config_file_exists() {
    let config_path = Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_config_toml_readable() {
    let content =
        std::fs::read_to_string("config.toml").expect("Should be able to read config.toml");

    assert!(content.contains("[analysis]"));
    assert!(content.contains("[server]"));
    assert!(content.contains("[logging]"));
}

#[test]
fn test_shipped_config_loads_and_validates() {
    let config = Config::from_file(Path::new("config.toml")).unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.analysis.mode, SourceMode::Live);
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_from_file_partial_sections_use_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[analysis]\nmode = \"simulated\"\ntimeout_secs = 5\n\n[server]\nport = 8080"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.analysis.mode, SourceMode::Simulated);
    assert_eq!(config.analysis.timeout_secs, 5);
    assert_eq!(config.analysis.interpreter, "python");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_from_file_rejects_unknown_mode() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[analysis]\nmode = \"batch\"").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_from_file_missing_path() {
    let err = Config::from_file(Path::new("/nonexistent/asgard.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.analysis.mode, SourceMode::Live);
    assert_eq!(config.analysis.timeout_secs, 60);
    assert_eq!(config.analysis.max_concurrent_runs, None);
    assert_eq!(config.server.port, 3000);
}

#[test]
#[serial]
fn test_from_env_production_selects_simulated() {
    clear_env();
    std::env::set_var("ASGARD_ENV", "production");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.analysis.mode, SourceMode::Simulated);
}

#[test]
#[serial]
fn test_from_env_explicit_mode_wins() {
    clear_env();
    std::env::set_var("ASGARD_ENV", "production");
    std::env::set_var("ASGARD_TRENDS_MODE", "live");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.analysis.mode, SourceMode::Live);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("ASGARD_INTERPRETER", "python3");
    std::env::set_var("ASGARD_SCRIPT_PATH", "/opt/asgard/trends.py");
    std::env::set_var("ASGARD_ANALYSIS_TIMEOUT", "15");
    std::env::set_var("ASGARD_MAX_CONCURRENT_RUNS", "2");
    std::env::set_var("ASGARD_PORT", "9090");
    std::env::set_var("ASGARD_LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.analysis.interpreter, "python3");
    assert_eq!(
        config.analysis.script_path,
        Path::new("/opt/asgard/trends.py")
    );
    assert_eq!(config.analysis.timeout_secs, 15);
    assert_eq!(config.analysis.max_concurrent_runs, Some(2));
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_invalid_mode() {
    clear_env();
    std::env::set_var("ASGARD_TRENDS_MODE", "batch");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}
