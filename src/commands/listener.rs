//! Command listener loop.
//!
//! # Responsibilities
//! - Poll the command source until shutdown
//! - Answer `/status` and `/help` from the authorized chat only
//! - Back off on source errors and retry indefinitely

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::commands::{Command, CommandSource, IncomingCommand};
use crate::lifecycle::ShutdownSignal;
use crate::notify::{self, format::help_text, Notifier};
use crate::resilience::backoff::calculate_backoff;
use crate::targets::Registry;

pub struct CommandListener<S> {
    source: S,
    registry: Arc<Registry>,
    notifier: Arc<dyn Notifier>,
    authorized_sender: String,
    poll_interval: Duration,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl<S: CommandSource> CommandListener<S> {
    pub fn new(
        source: S,
        registry: Arc<Registry>,
        notifier: Arc<dyn Notifier>,
        authorized_sender: impl Into<String>,
    ) -> Self {
        Self {
            source,
            registry,
            notifier,
            authorized_sender: authorized_sender.into(),
            poll_interval: Duration::from_secs(1),
            backoff_base: Duration::from_secs(5),
            backoff_max: Duration::from_secs(60),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_max = max;
        self
    }

    /// React to a single message. Returns the command that was executed.
    pub async fn handle(&self, incoming: &IncomingCommand) -> Option<Command> {
        if incoming.sender != self.authorized_sender {
            tracing::debug!(sender = %incoming.sender, "Ignoring message from unauthorized chat");
            return None;
        }

        let command = Command::parse(&incoming.text)?;
        tracing::info!(command = ?command, "Handling chat command");

        let text = match command {
            Command::Status => notify::report_now(&self.registry),
            Command::Help => help_text(),
        };
        notify::deliver_logged(self.notifier.as_ref(), &text).await;

        Some(command)
    }

    pub async fn run(mut self, mut shutdown: ShutdownSignal) {
        tracing::info!("Command listener starting");
        let mut consecutive_errors = 0u32;

        loop {
            let batch = tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                batch = self.source.next_batch() => batch,
            };

            let pause = match batch {
                Ok(messages) => {
                    consecutive_errors = 0;
                    for message in &messages {
                        self.handle(message).await;
                    }
                    self.poll_interval
                }
                Err(e) => {
                    consecutive_errors = consecutive_errors.saturating_add(1);
                    let delay = calculate_backoff(
                        consecutive_errors,
                        self.backoff_base.as_millis() as u64,
                        self.backoff_max.as_millis() as u64,
                    );
                    tracing::warn!(
                        error = %e,
                        attempt = consecutive_errors,
                        retry_ms = delay.as_millis() as u64,
                        "Command poll failed"
                    );
                    delay
                }
            };

            tokio::select! {
                _ = shutdown.recv() => break,
                _ = sleep(pause) => {}
            }
        }

        tracing::info!("Command listener stopped");
    }
}
