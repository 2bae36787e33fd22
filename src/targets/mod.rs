//! Monitored targets.
//!
//! # Data Flow
//! ```text
//! [[targets]] in config
//!     → spec.rs (ProbeSpec: kind tag + parameters)
//!     → registry.rs (Target bound to its Prober, Unknown state)
//!     → Scheduler writes state after each probe
//!     → CommandListener reads snapshots
//! ```

pub mod registry;
pub mod spec;

pub use registry::{Registry, Target, TargetSnapshot};
pub use spec::ProbeSpec;
