//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (token, chat id, intervals, run-once)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → handed to Registry, Scheduler and CommandListener at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; targets are fixed for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, IgnoredOverride, LoadedConfig};
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ScheduleConfig;
pub use schema::TargetConfig;
pub use schema::TelegramConfig;
