//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve every target's prober once from validated configuration
//! - Build the notifier and command source around one Telegram client
//! - Run either a single pass or the scheduler plus command listener
//!
//! # Design Decisions
//! - Fail fast: any construction error is fatal
//! - The startup announcement is best-effort, like every other message

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::commands::{CommandListener, TelegramCommandSource};
use crate::config::MonitorConfig;
use crate::lifecycle::Shutdown;
use crate::notify::{self, format::startup_text, NotifyError, TelegramApi, TelegramNotifier};
use crate::probe::ProberFactory;
use crate::scheduler::{Scheduler, SchedulerError, SchedulerSettings};
use crate::targets::Registry;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot build probe HTTP client: {0}")]
    ProbeClient(#[from] reqwest::Error),

    #[error("cannot build notifier: {0}")]
    Notifier(#[from] NotifyError),
}

/// Fully wired monitor, ready to run.
pub struct Monitor {
    config: MonitorConfig,
    registry: Arc<Registry>,
    api: TelegramApi,
}

impl Monitor {
    pub fn from_config(config: MonitorConfig) -> Result<Self, StartupError> {
        let factory = ProberFactory::new(Duration::from_secs(config.monitor.probe_timeout_secs))?;
        let registry = Arc::new(Registry::from_config(&config.targets, |spec| factory.build(spec)));
        let api = TelegramApi::new(&config.telegram)?;

        Ok(Self {
            config,
            registry,
            api,
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run until shutdown (continuous) or for exactly one pass.
    ///
    /// Shutdown is honoured from the first await: a signal during the
    /// single pass or the startup announcement ends the run.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), SchedulerError> {
        let mut signal = shutdown.subscribe();
        let notifier: Arc<dyn notify::Notifier> = Arc::new(TelegramNotifier::new(self.api.clone()));
        let settings = SchedulerSettings::from(&self.config.monitor);
        let scheduler = Scheduler::new(self.registry.clone(), notifier.clone(), settings.clone());

        if self.config.monitor.run_once {
            tokio::select! {
                biased;
                _ = signal.recv() => tracing::info!("Single check pass interrupted"),
                result = scheduler.run_once() => {
                    result?;
                }
            }
            return Ok(());
        }

        let announcement = startup_text(self.registry.len(), settings.check_interval);
        tokio::select! {
            biased;
            _ = signal.recv() => {
                tracing::info!("Shutdown requested during startup");
                return Ok(());
            }
            _ = notify::deliver_logged(notifier.as_ref(), &announcement) => {}
        }

        let telegram = &self.config.telegram;
        let source = TelegramCommandSource::new(
            self.api.clone(),
            Duration::from_secs(telegram.poll_timeout_secs),
        );
        let listener = CommandListener::new(source, self.registry.clone(), notifier, self.api.chat_id())
            .with_poll_interval(Duration::from_millis(telegram.poll_interval_ms));
        let listener_task = tokio::spawn(listener.run(shutdown.subscribe()));

        scheduler.run_forever(signal).await;

        if let Err(e) = listener_task.await {
            tracing::error!(error = %e, "Command listener task failed");
        }
        Ok(())
    }
}
