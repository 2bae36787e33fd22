//! Endpoint monitor library: debounced up/down alerting for hosts, ports,
//! URLs, containers and services.

pub mod commands;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod probe;
pub mod resilience;
pub mod scheduler;
pub mod targets;

pub use config::MonitorConfig;
pub use lifecycle::{Monitor, Shutdown};
pub use scheduler::Scheduler;
