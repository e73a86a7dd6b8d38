//! Session configuration.
//!
//! Time limits are fixed when a session is created and never change
//! afterwards.

use chrono::TimeDelta;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable naming a config file to load when no path is given.
pub const CONFIG_ENV_VAR: &str = "GOMOKU_CONFIG";

/// Time limits for a game session, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// How long the player to move has before they can be forced to forfeit.
    #[serde(default = "default_turn_time_limit")]
    turn_time_limit_secs: u64,

    /// How long the opponent has to answer a revoke request.
    #[serde(default = "default_revoke_wait_limit")]
    revoke_wait_limit_secs: u64,

    /// How soon after a move its author may ask to take it back.
    #[serde(default = "default_revoke_request_limit")]
    revoke_request_limit_secs: u64,
}

fn default_turn_time_limit() -> u64 {
    60
}

fn default_revoke_wait_limit() -> u64 {
    30
}

fn default_revoke_request_limit() -> u64 {
    10
}

fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

impl GameConfig {
    /// Creates a configuration from explicit limits.
    pub fn new(
        turn_time_limit_secs: u64,
        revoke_wait_limit_secs: u64,
        revoke_request_limit_secs: u64,
    ) -> Self {
        Self {
            turn_time_limit_secs,
            revoke_wait_limit_secs,
            revoke_request_limit_secs,
        }
    }

    /// Turn time limit as a duration.
    pub fn turn_time_limit(&self) -> TimeDelta {
        seconds(self.turn_time_limit_secs)
    }

    /// Revoke answer window as a duration.
    pub fn revoke_wait_limit(&self) -> TimeDelta {
        seconds(self.revoke_wait_limit_secs)
    }

    /// Revoke request window as a duration.
    pub fn revoke_request_limit(&self) -> TimeDelta {
        seconds(self.revoke_request_limit_secs)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration: an explicit path wins, then
    /// the file named by `GOMOKU_CONFIG`, then the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            default_turn_time_limit(),
            default_revoke_wait_limit(),
            default_revoke_request_limit(),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.turn_time_limit_secs(), 60);
        assert_eq!(config.revoke_wait_limit(), TimeDelta::seconds(30));
        assert_eq!(config.revoke_request_limit(), TimeDelta::seconds(10));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = GameConfig::from_toml_str("turn_time_limit_secs = 5\n").unwrap();
        assert_eq!(*config.turn_time_limit_secs(), 5);
        assert_eq!(*config.revoke_wait_limit_secs(), 30);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = GameConfig::from_toml_str("turn_time_limit_secs = \"soon\"").unwrap_err();
        assert!(err.message.contains("parse"));
    }

    #[test]
    fn test_huge_limit_saturates() {
        let config = GameConfig::new(u64::MAX, 0, 0);
        assert_eq!(config.turn_time_limit(), TimeDelta::MAX);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GameConfig::new(90, 20, 5);
        let text = config.to_toml().unwrap();
        assert_eq!(GameConfig::from_toml_str(&text).unwrap(), config);
    }
}
