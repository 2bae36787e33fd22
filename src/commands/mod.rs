//! Chat command subsystem.
//!
//! # Data Flow
//! ```text
//! CommandSource (long-poll, restartable on error)
//!     → (sender, text) pairs
//!     → listener.rs (authorize sender, parse vocabulary)
//!     → Registry snapshot → report text → Notifier
//! ```
//!
//! # Design Decisions
//! - Only the configured chat may issue commands; everything else is ignored silently
//! - Source errors back off and retry forever, never ending the listener

pub mod listener;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;

use crate::notify::NotifyError;

pub use listener::CommandListener;
pub use telegram::TelegramCommandSource;

/// Recognized chat commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    Help,
}

impl Command {
    /// Parse a chat message; case-insensitive, surrounding whitespace ignored.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "/status" | "/stato" | "status" | "stato" => Some(Command::Status),
            "/help" | "/aiuto" | "help" => Some(Command::Help),
            _ => None,
        }
    }
}

/// One message received from the command source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingCommand {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command source API error: {0}")]
    Api(#[from] NotifyError),

    #[error("command source unavailable: {0}")]
    Unavailable(String),
}

/// Lazy stream of incoming chat messages.
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Wait for the next batch of messages. May return an empty batch.
    async fn next_batch(&mut self) -> Result<Vec<IncomingCommand>, CommandError>;
}
