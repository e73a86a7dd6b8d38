//! Loading time limits from TOML files.

use chrono::TimeDelta;
use std::io::Write;
use strictly_gomoku::GameConfig;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "turn_time_limit_secs = 90").unwrap();
    writeln!(file, "revoke_wait_limit_secs = 15").unwrap();

    let config = GameConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.turn_time_limit(), TimeDelta::seconds(90));
    assert_eq!(config.revoke_wait_limit(), TimeDelta::seconds(15));
    // Missing keys fall back to defaults
    assert_eq!(config.revoke_request_limit(), TimeDelta::seconds(10));
}

#[test]
fn test_written_config_reloads() {
    let config = GameConfig::new(120, 20, 5);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

    assert_eq!(GameConfig::from_file(file.path()).unwrap(), config);
}

#[test]
fn test_bad_file_reports_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "turn_time_limit_secs = \"soon\"").unwrap();
    let error = GameConfig::from_file(file.path()).unwrap_err();
    assert!(error.message.contains("Failed to parse config"));

    let missing = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(missing.message.contains("Failed to read config file"));
}
