//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stdout + optional file)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log file / journal
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Target name is a structured field on every probe-related event
//! - Metrics are cheap and recorded unconditionally

pub mod logging;
pub mod metrics;
