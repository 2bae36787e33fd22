//! Target registry.
//!
//! # Responsibilities
//! - Own every monitored target for the process lifetime
//! - Bind each target to its prober once, at construction
//! - Hand out consistent read-only snapshots while the scheduler writes
//!
//! # Design Decisions
//! - Health state lives behind an `ArcSwap` per target: the scheduler is
//!   the single writer, readers never block it
//! - Registration order is preserved in snapshots

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::TargetConfig;
use crate::health::state::{HealthState, ProbeResult, Status, TransitionEvent};
use crate::probe::Prober;
use crate::targets::ProbeSpec;
use chrono::{DateTime, Utc};

/// A single monitored endpoint.
pub struct Target {
    name: String,
    kind: String,
    prober: Arc<dyn Prober>,
    state: ArcSwap<HealthState>,
}

impl Target {
    /// Create a target in the `Unknown` state.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, prober: Arc<dyn Prober>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            prober,
            state: ArcSwap::from_pointee(HealthState::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn prober(&self) -> Arc<dyn Prober> {
        self.prober.clone()
    }

    pub fn status(&self) -> Status {
        self.state.load().status
    }

    /// Current health state.
    pub fn state(&self) -> Arc<HealthState> {
        self.state.load_full()
    }

    /// Apply a probe outcome and publish the new state.
    ///
    /// Must only be called by the task that owns probing for this target.
    pub fn record(
        &self,
        result: &ProbeResult,
        failure_threshold: u32,
        now: DateTime<Utc>,
    ) -> Option<TransitionEvent> {
        let mut next = HealthState::clone(&self.state.load());
        let event = next.apply(result, failure_threshold, now);
        self.state.store(Arc::new(next));
        event
    }

    pub fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            name: self.name.clone(),
            kind: self.kind.clone(),
            state: HealthState::clone(&self.state.load()),
        }
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("state", &self.state.load_full())
            .finish()
    }
}

/// Point-in-time copy of a target's identity and health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSnapshot {
    pub name: String,
    pub kind: String,
    pub state: HealthState,
}

/// Fixed collection of targets.
#[derive(Debug, Default)]
pub struct Registry {
    targets: Vec<Arc<Target>>,
}

impl Registry {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets: targets.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build targets from configuration, resolving each prober once.
    pub fn from_config<F>(configs: &[TargetConfig], mut prober_for: F) -> Self
    where
        F: FnMut(&ProbeSpec) -> Arc<dyn Prober>,
    {
        let targets = configs
            .iter()
            .map(|config| {
                Target::new(
                    config.name.clone(),
                    config.probe.label(),
                    prober_for(&config.probe),
                )
            })
            .collect();

        let registry = Self::new(targets);
        tracing::info!(count = registry.len(), "Targets initialized");
        registry
    }

    pub fn targets(&self) -> &[Arc<Target>] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Ordered copy of every target's state.
    pub fn snapshot(&self) -> Vec<TargetSnapshot> {
        self.targets.iter().map(|t| t.snapshot()).collect()
    }

    pub fn any_down(&self) -> bool {
        self.targets.iter().any(|t| t.status() == Status::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixed;

    #[async_trait]
    impl Prober for Fixed {
        async fn probe(&self) -> ProbeResult {
            ProbeResult::up(Duration::from_millis(1))
        }
    }

    fn config(name: &str, probe: ProbeSpec) -> TargetConfig {
        TargetConfig { name: name.into(), probe }
    }

    #[test]
    fn test_from_config_preserves_order_and_labels() {
        let configs = vec![
            config("b", ProbeSpec::Tcp { host: "h".into(), port: 22 }),
            config("a", ProbeSpec::Ping { host: "h".into() }),
        ];
        let mut resolved = 0;
        let registry = Registry::from_config(&configs, |_| {
            resolved += 1;
            Arc::new(Fixed) as Arc<dyn Prober>
        });

        assert_eq!(resolved, 2);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot[0].name, "b");
        assert_eq!(snapshot[0].kind, "TCP:22");
        assert_eq!(snapshot[1].name, "a");
        assert_eq!(snapshot[1].state.status, Status::Unknown);
    }

    #[test]
    fn test_record_publishes_state() {
        let registry = Registry::new(vec![Target::new("a", "Docker", Arc::new(Fixed))]);
        let target = &registry.targets()[0];
        let before = registry.snapshot();

        target.record(&ProbeResult::down("boom"), 1, Utc::now());

        assert_eq!(before[0].state.status, Status::Unknown);
        assert_eq!(target.status(), Status::Down);
        assert!(registry.any_down());
        assert_eq!(registry.snapshot()[0].state.last_error, "boom");
    }
}
