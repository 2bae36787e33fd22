//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! TransitionEvent + updated TargetSnapshot
//!     → format.rs (HTML alert text)
//!     → Notifier::deliver
//!     → telegram.rs (sendMessage)
//!
//! Report / help request:
//!     → format.rs → Notifier::deliver
//! ```
//!
//! # Design Decisions
//! - Delivery is best-effort: failures are logged by the caller and never
//!   retried or propagated into target state

pub mod format;
pub mod telegram;

use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;

use crate::health::StatusReport;
use crate::targets::Registry;

pub use telegram::{TelegramApi, TelegramNotifier};

/// Errors that can occur while talking to the messaging API.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API rejected request: {0}")]
    Rejected(String),
}

/// Opaque "deliver a text message" sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), NotifyError>;
}

/// Deliver `text`, logging instead of propagating failures.
pub async fn deliver_logged(notifier: &dyn Notifier, text: &str) -> bool {
    match notifier.deliver(text).await {
        Ok(()) => {
            crate::observability::metrics::record_notification(true);
            true
        }
        Err(e) => {
            crate::observability::metrics::record_notification(false);
            tracing::error!(error = %e, "Notification delivery failed");
            false
        }
    }
}

/// Render the current status of every target.
pub fn report_now(registry: &Registry) -> String {
    let report = StatusReport::from_snapshot(registry.snapshot());
    format::format_report(&report, &Local::now())
}
