//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hubbridge.toml` in `$UC_CONFIG_HOME`, or in the working
//! directory when that is unset. Every field has a default so the file is
//! optional, but the hub connection must be provided by the file or the
//! environment. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use hubbridge_adapter_maker_api::MakerApiConfig;
use hubbridge_app::services::command_service::BusyPolicy;
use hubbridge_domain::factory::DEFAULT_COLOR_TEMPERATURE;

const FILE_NAME: &str = "hubbridge.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maker API connection.
    pub hub: MakerApiConfig,
    /// Entity construction and command handling.
    pub entities: EntitiesConfig,
    /// Which hub devices are exposed.
    pub discovery: DiscoveryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Entity settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EntitiesConfig {
    /// Colour temperature assumed when the hub reports none, in Kelvin.
    pub default_color_temperature: u32,
    /// How a command for a busy entity is handled.
    pub busy_policy: BusyPolicy,
}

/// Discovery settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Hub device ids to expose; empty exposes every device.
    pub device_filter: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hubbridge.toml` (if present), apply
    /// environment-variable overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed or
    /// unreadable, or if the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let mut config = Self::from_file(&config_path(env))?;
        config.apply_env_overrides(env);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(val) = env("HUBBRIDGE_HUB_ADDRESS") {
            self.hub.address = val;
        }
        if let Some(val) = env("HUBBRIDGE_APP_ID") {
            self.hub.app_id = val;
        }
        if let Some(val) = env("HUBBRIDGE_ACCESS_TOKEN") {
            self.hub.access_token = val;
        }
        if let Some(val) = env("HUBBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = env("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("hub.address", &self.hub.address),
            ("hub.app_id", &self.hub.app_id),
            ("hub.access_token", &self.hub.access_token),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must be set")));
            }
        }
        if self.hub.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "hub.request_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.entities.default_color_temperature == 0 {
            return Err(ConfigError::Validation(
                "entities.default_color_temperature must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the config file is looked up.
fn config_path(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    match env("UC_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Path::new(&dir).join(FILE_NAME),
        _ => PathBuf::from(FILE_NAME),
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            default_color_temperature: DEFAULT_COLOR_TEMPERATURE,
            busy_policy: BusyPolicy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hubbridged=info,hubbridge=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn connected() -> Config {
        let mut config = Config::default();
        config.hub.address = "192.168.1.20".to_string();
        config.hub.app_id = "42".to_string();
        config.hub.access_token = "secret".to_string();
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.hub.request_timeout_secs, 10);
        assert_eq!(config.entities.default_color_temperature, 2700);
        assert_eq!(config.entities.busy_policy, BusyPolicy::Queue);
        assert!(config.discovery.device_filter.is_empty());
        assert_eq!(config.logging.filter, "hubbridged=info,hubbridge=info");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [hub]
            address = '10.0.0.5'
            app_id = '7'
            access_token = 'abc'
            request_timeout_secs = 4

            [entities]
            default_color_temperature = 3000
            busy_policy = 'reject'

            [discovery]
            device_filter = ['12', '15']

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hub.address, "10.0.0.5");
        assert_eq!(config.hub.app_id, "7");
        assert_eq!(config.hub.access_token, "abc");
        assert_eq!(config.hub.request_timeout_secs, 4);
        assert_eq!(config.entities.default_color_temperature, 3000);
        assert_eq!(config.entities.busy_policy, BusyPolicy::Reject);
        assert_eq!(config.discovery.device_filter, vec!["12", "15"]);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [hub]
            address = 'hub.local'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hub.address, "hub.local");
        assert_eq!(config.hub.request_timeout_secs, 10);
        assert_eq!(config.entities.default_color_temperature, 2700);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert!(config.hub.address.is_empty());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_look_up_file_in_config_home() {
        let path = config_path(env(&[("UC_CONFIG_HOME", "/data")]));
        assert_eq!(path, Path::new("/data").join("hubbridge.toml"));
    }

    #[test]
    fn should_look_up_file_in_working_directory_when_config_home_unset() {
        assert_eq!(config_path(env(&[])), PathBuf::from("hubbridge.toml"));
    }

    #[test]
    fn should_override_file_values_from_environment() {
        let mut config = connected();
        config.apply_env_overrides(env(&[
            ("HUBBRIDGE_HUB_ADDRESS", "10.0.0.9"),
            ("HUBBRIDGE_ACCESS_TOKEN", "rotated"),
            ("HUBBRIDGE_LOG", "trace"),
        ]));
        assert_eq!(config.hub.address, "10.0.0.9");
        assert_eq!(config.hub.app_id, "42");
        assert_eq!(config.hub.access_token, "rotated");
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_rust_log_over_hubbridge_log() {
        let mut config = connected();
        config.apply_env_overrides(env(&[("HUBBRIDGE_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_accept_complete_connection() {
        assert!(connected().validate().is_ok());
    }

    #[test]
    fn should_reject_missing_access_token() {
        let mut config = connected();
        config.hub.access_token = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: hub.access_token must be set"
        );
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = connected();
        config.hub.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_default_color_temperature() {
        let mut config = connected();
        config.entities.default_color_temperature = 0;
        assert!(config.validate().is_err());
    }
}
