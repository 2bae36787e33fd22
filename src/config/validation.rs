//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, ports valid, status codes)
//! - Detect duplicate target names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::targets::ProbeSpec;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("telegram.{0} is required")]
    MissingCredential(&'static str),

    #[error("target #{0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate target name '{0}'")]
    DuplicateName(String),

    #[error("target '{name}': {reason}")]
    InvalidTarget { name: String, reason: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let monitor = &config.monitor;
    if monitor.check_interval_secs == 0 {
        errors.push(ValidationError::Zero("monitor.check_interval_secs"));
    }
    if monitor.retry_interval_secs == 0 {
        errors.push(ValidationError::Zero("monitor.retry_interval_secs"));
    }
    if monitor.probe_timeout_secs == 0 {
        errors.push(ValidationError::Zero("monitor.probe_timeout_secs"));
    }
    if monitor.failure_threshold == 0 {
        errors.push(ValidationError::Zero("monitor.failure_threshold"));
    }

    if config.telegram.bot_token.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("bot_token"));
    }
    if config.telegram.chat_id.trim().is_empty() {
        errors.push(ValidationError::MissingCredential("chat_id"));
    }

    let mut seen = HashSet::new();
    for (idx, target) in config.targets.iter().enumerate() {
        if target.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName(idx));
            continue;
        }
        if !seen.insert(target.name.as_str()) {
            errors.push(ValidationError::DuplicateName(target.name.clone()));
        }
        if let Err(reason) = validate_probe(&target.probe) {
            errors.push(ValidationError::InvalidTarget {
                name: target.name.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_probe(spec: &ProbeSpec) -> Result<(), String> {
    match spec {
        ProbeSpec::Ping { host } if host.trim().is_empty() => Err("host is empty".into()),
        ProbeSpec::Tcp { host, .. } if host.trim().is_empty() => Err("host is empty".into()),
        ProbeSpec::Tcp { port: 0, .. } => Err("port must be non-zero".into()),
        ProbeSpec::Http { url, expected_status } => {
            let parsed = url::Url::parse(url).map_err(|e| format!("invalid url '{}': {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("unsupported scheme '{}'", parsed.scheme()));
            }
            if !(100..=599).contains(expected_status) {
                return Err(format!("expected_status {} is not an HTTP status", expected_status));
            }
            Ok(())
        }
        ProbeSpec::Container { container } if container.trim().is_empty() => {
            Err("container is empty".into())
        }
        ProbeSpec::Service { service } if service.trim().is_empty() => {
            Err("service is empty".into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TargetConfig;

    fn valid_config() -> MonitorConfig {
        let mut config = MonitorConfig::default();
        config.telegram.bot_token = "123:abc".into();
        config.telegram.chat_id = "42".into();
        config.targets.push(TargetConfig {
            name: "site".into(),
            probe: ProbeSpec::Http { url: "https://example.org".into(), expected_status: 200 },
        });
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.telegram.bot_token.clear();
        config.monitor.failure_threshold = 0;
        config.targets.push(TargetConfig {
            name: "site".into(),
            probe: ProbeSpec::Tcp { host: "db".into(), port: 0 },
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingCredential("bot_token")));
        assert!(errors.contains(&ValidationError::Zero("monitor.failure_threshold")));
        assert!(errors.contains(&ValidationError::DuplicateName("site".into())));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidTarget { reason, .. } if reason.contains("port"))));
    }

    #[test]
    fn test_rejects_bad_url() {
        let mut config = valid_config();
        config.targets[0].probe = ProbeSpec::Http { url: "not a url".into(), expected_status: 200 };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("target 'site'"));
    }

    #[test]
    fn test_rejects_bad_status() {
        let mut config = valid_config();
        config.targets[0].probe = ProbeSpec::Http { url: "http://a".into(), expected_status: 42 };
        assert!(validate_config(&config).is_err());
    }
}
