//! Target health state machine.
//!
//! # States
//! - Unknown: no probe has completed yet
//! - Up: last probe succeeded
//! - Down: `failure_threshold` consecutive probes failed
//!
//! # State Transitions
//! ```text
//! Unknown/Up → Down: consecutive failures >= failure_threshold
//! Down → Up:         first successful probe
//! Unknown → Up:      first successful probe (silent)
//! ```
//!
//! # Design Decisions
//! - Hysteresis only on the way down; one success is enough to recover
//! - Each genuine transition yields exactly one event
//! - The clock is passed in so transitions are deterministic under test

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Debounced status of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Unknown,
    Up,
    Down,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "UNKNOWN",
            Status::Up => "UP",
            Status::Down => "DOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub ok: bool,
    pub latency: Duration,
    /// Empty when the probe succeeded.
    pub error: String,
}

impl ProbeResult {
    pub fn up(latency: Duration) -> Self {
        Self {
            ok: true,
            latency,
            error: String::new(),
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            latency: Duration::ZERO,
            error: error.into(),
        }
    }

    /// A failure that still measured a response (e.g. wrong HTTP status).
    pub fn down_after(latency: Duration, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            latency,
            error: error.into(),
        }
    }
}

/// Event emitted when the debounced status changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    WentDown {
        error: String,
    },
    Recovered {
        /// Time spent down, if the start of the outage is known.
        downtime: Option<Duration>,
        latency: Duration,
    },
}

impl TransitionEvent {
    pub fn is_down(&self) -> bool {
        matches!(self, TransitionEvent::WentDown { .. })
    }
}

/// Mutable health state of one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthState {
    pub status: Status,
    pub consecutive_failures: u32,
    pub last_check: Option<DateTime<Utc>>,
    pub last_transition: Option<DateTime<Utc>>,
    pub last_latency: Duration,
    pub last_error: String,
}

impl HealthState {
    /// Feed one probe outcome into the state machine.
    ///
    /// Returns an event only when the debounced status genuinely changes
    /// into or out of `Down`.
    pub fn apply(
        &mut self,
        result: &ProbeResult,
        failure_threshold: u32,
        now: DateTime<Utc>,
    ) -> Option<TransitionEvent> {
        self.last_check = Some(now);
        self.last_latency = result.latency;

        if result.ok {
            self.last_error.clear();
            self.consecutive_failures = 0;

            if self.status == Status::Down {
                let downtime = self
                    .last_transition
                    .and_then(|since| (now - since).to_std().ok());
                self.status = Status::Up;
                self.last_transition = Some(now);
                return Some(TransitionEvent::Recovered {
                    downtime,
                    latency: result.latency,
                });
            }

            self.status = Status::Up;
            return None;
        }

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_error = result.error.clone();

        if self.consecutive_failures >= failure_threshold && self.status != Status::Down {
            self.status = Status::Down;
            self.last_transition = Some(now);
            return Some(TransitionEvent::WentDown {
                error: result.error.clone(),
            });
        }

        None
    }
}
