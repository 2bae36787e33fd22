//! Health tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe outcome (ok, latency, error)
//!     → state.rs (debounce, hysteresis)
//!     → Option<TransitionEvent>
//!     → Scheduler dispatches one notification per event
//!
//! Report request:
//!     Registry snapshot
//!     → report.rs (counts, Down-first ordering)
//!     → notify::format renders text
//! ```
//!
//! # Design Decisions
//! - State transitions require consecutive failures, recovery needs one success
//! - Health state is per-target; targets never share counters
//! - Semantic status is separate from its presentation glyphs

pub mod report;
pub mod state;

pub use report::StatusReport;
pub use state::{HealthState, ProbeResult, Status, TransitionEvent};
