//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An environment override that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub key: &'static str,
    pub value: String,
}

/// Configuration plus the overrides that were skipped.
///
/// Loading runs before logging is initialised, so callers log `ignored`
/// once the subscriber is installed.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: MonitorConfig,
    pub ignored: Vec<IgnoredOverride>,
}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: MonitorConfig = toml::from_str(&content)?;

    let ignored = apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(LoadedConfig { config, ignored })
}

/// Overlay well-known environment variables on top of file values.
///
/// Unparsable numeric values leave the file value in place and are returned.
pub fn apply_env_overrides<F>(config: &mut MonitorConfig, lookup: F) -> Vec<IgnoredOverride>
where
    F: Fn(&str) -> Option<String>,
{
    let mut ignored = Vec::new();

    if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
        config.telegram.bot_token = token;
    }
    if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID") {
        config.telegram.chat_id = chat_id;
    }

    let mut numeric = |key: &'static str, slot: &mut u64| {
        if let Some(raw) = lookup(key) {
            match raw.trim().parse() {
                Ok(value) => *slot = value,
                Err(_) => ignored.push(IgnoredOverride { key, value: raw }),
            }
        }
    };
    numeric("CHECK_INTERVAL", &mut config.monitor.check_interval_secs);
    numeric("RETRY_INTERVAL", &mut config.monitor.retry_interval_secs);
    numeric("TIMEOUT", &mut config.monitor.probe_timeout_secs);

    if let Some(raw) = lookup("RUN_ONCE") {
        config.monitor.run_once = raw.trim().eq_ignore_ascii_case("true");
    }

    ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("TELEGRAM_BOT_TOKEN", "t0k"),
            ("TELEGRAM_CHAT_ID", "99"),
            ("CHECK_INTERVAL", "60"),
            ("TIMEOUT", "abc"),
            ("RUN_ONCE", "TRUE"),
        ]);
        let mut config = MonitorConfig::default();
        let ignored = apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(
            ignored,
            vec![IgnoredOverride {
                key: "TIMEOUT",
                value: "abc".into()
            }]
        );
        assert_eq!(config.telegram.bot_token, "t0k");
        assert_eq!(config.telegram.chat_id, "99");
        assert_eq!(config.monitor.check_interval_secs, 60);
        assert_eq!(config.monitor.probe_timeout_secs, 10);
        assert!(config.monitor.run_once);
    }

    #[test]
    fn test_run_once_false_unless_true() {
        let vars = env(&[("RUN_ONCE", "yes")]);
        let mut config = MonitorConfig::default();
        config.monitor.run_once = true;
        assert!(apply_env_overrides(&mut config, |k| vars.get(k).cloned()).is_empty());
        assert!(!config.monitor.run_once);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/monitor.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = ConfigError::Validation(vec![
            ValidationError::MissingCredential("bot_token"),
            ValidationError::Zero("monitor.failure_threshold"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: telegram.bot_token is required, monitor.failure_threshold must be greater than zero"
        );
    }
}
