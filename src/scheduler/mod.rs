//! Probe scheduler.
//!
//! # Data Flow
//! ```text
//! Tick:
//!     every Target
//!     → spawn probe under hard deadline (JoinSet, all joined before the tick ends)
//!     → feed each outcome into the Target's state machine
//!     → one notification per TransitionEvent
//!
//! Run-once:   one tick → status report if anything is Down → return
//! Continuous: tick every check_interval until shutdown
//! ```
//!
//! # Design Decisions
//! - A tick never overlaps the previous one, so a target is never probed twice at once
//! - A panicking or hung prober becomes a failed outcome for that target only
//! - Overrun ticks start immediately after the previous one completes
//! - A lost probe task still yields an outcome; the tick then reports an error
//!   so the continuous loop backs off for `retry_interval`

use chrono::{Local, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};

use crate::config::ScheduleConfig;
use crate::health::{ProbeResult, TransitionEvent};
use crate::lifecycle::ShutdownSignal;
use crate::notify::{self, format::format_alert, Notifier};
use crate::observability::metrics;
use crate::resilience::timeouts::probe_with_deadline;
use crate::targets::Registry;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("{lost} of {total} probe tasks lost")]
    TasksLost { lost: usize, total: usize },
}

/// Timing and alerting knobs for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    pub check_interval: Duration,
    pub retry_interval: Duration,
    pub probe_timeout: Duration,
    pub failure_threshold: u32,
    pub alert_on_recovery: bool,
}

impl From<&ScheduleConfig> for SchedulerSettings {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            check_interval: Duration::from_secs(config.check_interval_secs),
            retry_interval: Duration::from_secs(config.retry_interval_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            failure_threshold: config.failure_threshold,
            alert_on_recovery: config.alert_on_recovery,
        }
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self::from(&ScheduleConfig::default())
    }
}

/// A transition observed during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredEvent {
    pub target: String,
    pub event: TransitionEvent,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    pub probed: usize,
    pub failed: usize,
    pub events: Vec<FiredEvent>,
}

pub struct Scheduler {
    registry: Arc<Registry>,
    notifier: Arc<dyn Notifier>,
    settings: SchedulerSettings,
}

impl Scheduler {
    pub fn new(registry: Arc<Registry>, notifier: Arc<dyn Notifier>, settings: SchedulerSettings) -> Self {
        Self {
            registry,
            notifier,
            settings,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Probe every target once and dispatch resulting alerts.
    pub async fn run_tick(&self) -> Result<TickSummary, SchedulerError> {
        let started = Instant::now();
        let targets = self.registry.targets();

        let mut tasks = JoinSet::new();
        for (idx, target) in targets.iter().enumerate() {
            let prober = target.prober();
            let deadline = self.settings.probe_timeout;
            tasks.spawn(async move {
                // Inner task so a panicking prober is observed as a JoinError here
                let result = match tokio::spawn(probe_with_deadline(prober, deadline)).await {
                    Ok(result) => result,
                    Err(e) if e.is_panic() => ProbeResult::down("Probe task panicked"),
                    Err(e) => ProbeResult::down(format!("Probe task failed: {}", e)),
                };
                (idx, result)
            });
        }

        let mut collected: Vec<Option<ProbeResult>> = (0..targets.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, result)) => collected[idx] = Some(result),
                Err(e) => tracing::error!(error = %e, "Probe task lost"),
            }
        }
        let outcomes = lost_as_failures(collected);
        let lost = outcomes.iter().filter(|(_, lost)| *lost).count();

        let mut summary = TickSummary {
            probed: outcomes.len(),
            ..Default::default()
        };

        for (idx, (result, _)) in outcomes.into_iter().enumerate() {
            let target = &targets[idx];
            metrics::record_probe(target.name(), &result);
            if !result.ok {
                summary.failed += 1;
                tracing::debug!(endpoint = %target.name(), error = %result.error, "Probe failed");
            }

            let event = target.record(&result, self.settings.failure_threshold, Utc::now());
            metrics::record_status(target.name(), target.status());

            if let Some(event) = event {
                self.dispatch(idx, &event).await;
                summary.events.push(FiredEvent {
                    target: target.name().to_string(),
                    event,
                });
            }
        }

        let elapsed = started.elapsed();
        metrics::record_tick(elapsed);
        tracing::debug!(
            probed = summary.probed,
            failed = summary.failed,
            events = summary.events.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Tick complete"
        );

        if lost > 0 {
            return Err(SchedulerError::TasksLost {
                lost,
                total: summary.probed,
            });
        }
        Ok(summary)
    }

    async fn dispatch(&self, idx: usize, event: &TransitionEvent) {
        let target = &self.registry.targets()[idx];
        metrics::record_transition(target.name(), event.is_down());

        match event {
            TransitionEvent::WentDown { error } => {
                tracing::error!(endpoint = %target.name(), error = %error, "Target DOWN");
            }
            TransitionEvent::Recovered { latency, .. } => {
                tracing::info!(
                    endpoint = %target.name(),
                    latency_ms = latency.as_secs_f64() * 1000.0,
                    "Target RECOVERED"
                );
                if !self.settings.alert_on_recovery {
                    return;
                }
            }
        }

        let text = format_alert(&target.snapshot(), event, &Local::now());
        notify::deliver_logged(self.notifier.as_ref(), &text).await;
    }

    /// One tick, then a full report if any target is down.
    pub async fn run_once(&self) -> Result<TickSummary, SchedulerError> {
        tracing::info!("Running single check pass");
        let summary = self.run_tick().await?;

        if self.registry.any_down() {
            let report = notify::report_now(&self.registry);
            notify::deliver_logged(self.notifier.as_ref(), &report).await;
        }

        tracing::info!(events = summary.events.len(), "Single check completed");
        Ok(summary)
    }

    /// Tick every `check_interval` until shutdown. The in-flight tick is
    /// always allowed to finish.
    pub async fn run_forever(&self, shutdown: ShutdownSignal) {
        tracing::info!(
            interval_secs = self.settings.check_interval.as_secs(),
            targets = self.registry.len(),
            "Scheduler starting"
        );
        self.drive(shutdown, move || self.run_tick()).await;
        tracing::info!("Scheduler stopped");
    }

    async fn drive<F, Fut>(&self, mut shutdown: ShutdownSignal, mut tick: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<TickSummary, SchedulerError>>,
    {
        let mut ticker = time::interval(self.settings.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!("Scheduler received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {}
            }

            if let Err(e) = tick().await {
                tracing::error!(
                    error = %e,
                    retry_secs = self.settings.retry_interval.as_secs(),
                    "Tick failed, backing off"
                );
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => break,
                    _ = time::sleep(self.settings.retry_interval) => {}
                }
                ticker.reset_immediately();
            }
        }
    }
}

/// Pair every slot with its outcome; empty slots become failures flagged as lost.
fn lost_as_failures(collected: Vec<Option<ProbeResult>>) -> Vec<(ProbeResult, bool)> {
    collected
        .into_iter()
        .map(|slot| match slot {
            Some(result) => (result, false),
            None => (ProbeResult::down("Probe task lost"), true),
        })
        .collect()
}
