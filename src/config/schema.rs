//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::targets::ProbeSpec;

/// Root configuration for the monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Scheduling and debounce settings.
    pub monitor: ScheduleConfig,

    /// Telegram bot credentials and polling settings.
    pub telegram: TelegramConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Targets to watch, in registration order.
    pub targets: Vec<TargetConfig>,
}

/// Scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Seconds between the start of successive ticks.
    pub check_interval_secs: u64,

    /// Seconds to wait after an unexpected tick error.
    pub retry_interval_secs: u64,

    /// Hard deadline for a single probe in seconds.
    pub probe_timeout_secs: u64,

    /// Number of consecutive failures before a target is declared down.
    pub failure_threshold: u32,

    /// Deliver a message when a target recovers.
    pub alert_on_recovery: bool,

    /// Execute a single tick and exit.
    pub run_once: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 30,
            retry_interval_secs: 10,
            probe_timeout_secs: 10,
            failure_threshold: 2,
            alert_on_recovery: true,
            run_once: false,
        }
    }
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    pub bot_token: String,

    /// Chat that receives alerts and is allowed to send commands.
    pub chat_id: String,

    /// Base URL of the Bot API.
    pub api_base: String,

    /// Long-poll duration for `getUpdates` in seconds.
    pub poll_timeout_secs: u64,

    /// Pause between successful polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 10,
            poll_interval_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Optional log file, empty to disable.
    pub log_file: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: "monitor.log".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// A single monitored target.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TargetConfig {
    /// Display name, unique across the configuration.
    pub name: String,

    /// Kind tag plus kind-specific parameters.
    #[serde(flatten)]
    pub probe: ProbeSpec,
}
