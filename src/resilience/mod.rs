//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe call:
//!     → timeouts.rs (hard deadline, timeout becomes a failed outcome)
//!
//! Command source poll error:
//!     → backoff.rs (exponential delay with jitter, retry forever)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every probe has a deadline
//! - Jittered backoff prevents hammering a failing API

pub mod backoff;
pub mod timeouts;
