use crate::inspect::UnionKind;
use clap::ValueEnum;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    /// Union used when `--kind` is not given.
    pub default_kind: UnionKind,
    /// Pretty-print re-encoded JSON even without `--pretty`.
    pub pretty: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let default_kind = match std::env::var("EMPATH_DEFAULT_KIND") {
            Ok(kind) => UnionKind::from_str(&kind, true).map_err(|_| {
                ConfigError::InvalidValue(
                    "EMPATH_DEFAULT_KIND".to_string(),
                    format!("'{}' is not a known union kind", kind),
                )
            })?,
            Err(_) => UnionKind::Source,
        };

        let pretty = match std::env::var("EMPATH_PRETTY") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "EMPATH_PRETTY".to_string(),
                    format!("'{}' is not a boolean", value),
                )
            })?,
            Err(_) => false,
        };

        Ok(Self {
            log_level,
            default_kind,
            pretty,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("RUST_LOG");
            env::remove_var("EMPATH_DEFAULT_KIND");
            env::remove_var("EMPATH_PRETTY");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.default_kind, UnionKind::Source);
        assert!(!config.pretty);
    }

    #[test]
    #[serial]
    fn test_config_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "debug");
            env::set_var("EMPATH_DEFAULT_KIND", "server-event");
            env::set_var("EMPATH_PRETTY", "true");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.default_kind, UnionKind::ServerEvent);
        assert!(config.pretty);
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_kind() {
        clear_env_vars();
        unsafe {
            env::set_var("EMPATH_DEFAULT_KIND", "spaceship");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, msg) => {
                assert_eq!(var, "EMPATH_DEFAULT_KIND");
                assert!(msg.contains("spaceship"));
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_pretty_flag() {
        clear_env_vars();
        unsafe {
            env::set_var("EMPATH_PRETTY", "sometimes");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "EMPATH_PRETTY"),
        }
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
