//! Application-level configuration loading: period length, auto-advance and team names.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::{
    controller::{DEFAULT_PERIOD_LENGTH_SECS, MatchSettings},
    match_state::PerTeam,
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "COURTSIDE_CONFIG_PATH";
const DEFAULT_HOME_NAME: &str = "Home";
const DEFAULT_AWAY_NAME: &str = "Away";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable startup configuration. Match settings can be changed at runtime through the API.
pub struct AppConfig {
    settings: MatchSettings,
    home_name: String,
    away_name: String,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        period_length_secs = config.settings.period_length_secs,
                        auto_advance = config.settings.auto_advance,
                        "loaded match configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document. Missing keys take their default value.
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Period length and auto-advance flag to start the match with.
    pub fn match_settings(&self) -> MatchSettings {
        self.settings
    }

    /// Names restored on startup and by a full reset.
    pub fn default_names(&self) -> PerTeam<String> {
        PerTeam {
            home: self.home_name.clone(),
            away: self.away_name.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: MatchSettings::default(),
            home_name: DEFAULT_HOME_NAME.into(),
            away_name: DEFAULT_AWAY_NAME.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default = "default_period_length")]
    period_length_secs: u32,
    #[serde(default)]
    auto_advance: bool,
    #[serde(default)]
    home_name: Option<String>,
    #[serde(default)]
    away_name: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let period_length_secs = if value.period_length_secs == 0 {
            warn!("period_length_secs must be positive; using default");
            DEFAULT_PERIOD_LENGTH_SECS
        } else {
            value.period_length_secs
        };

        Self {
            settings: MatchSettings {
                period_length_secs,
                auto_advance: value.auto_advance,
            },
            home_name: non_blank(value.home_name, DEFAULT_HOME_NAME),
            away_name: non_blank(value.away_name, DEFAULT_AWAY_NAME),
        }
    }
}

fn default_period_length() -> u32 {
    DEFAULT_PERIOD_LENGTH_SECS
}

fn non_blank(value: Option<String>, fallback: &str) -> String {
    value
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::parse("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.match_settings().period_length_secs, 720);
    }

    #[test]
    fn reads_every_field() {
        let config = AppConfig::parse(
            r#"{"period_length_secs": 600, "auto_advance": true, "home_name": "Lions", "away_name": "Others"}"#,
        )
        .unwrap();
        assert_eq!(
            config.match_settings(),
            MatchSettings {
                period_length_secs: 600,
                auto_advance: true
            }
        );
        assert_eq!(config.default_names().away, "Others");
    }

    #[test]
    fn zero_length_and_blank_names_fall_back() {
        let config =
            AppConfig::parse(r#"{"period_length_secs": 0, "home_name": "   "}"#).unwrap();
        assert_eq!(
            config.match_settings().period_length_secs,
            DEFAULT_PERIOD_LENGTH_SECS
        );
        assert_eq!(config.default_names().home, DEFAULT_HOME_NAME);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::parse(r#"{"period_length_secs": -5}"#).is_err());
    }
}
