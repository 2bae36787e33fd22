//! Telegram Bot API client.
//!
//! # Responsibilities
//! - Deliver HTML messages to the configured chat (`sendMessage`)
//! - Long-poll incoming updates for the command listener (`getUpdates`)
//!
//! # Design Decisions
//! - One `reqwest::Client` shared by both directions
//! - API-level failures (`"ok": false`) are surfaced as errors, not swallowed

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::TelegramConfig;
use crate::notify::{Notifier, NotifyError};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// An incoming update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Thin wrapper over the Bot API endpoints the monitor uses.
#[derive(Clone)]
pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
    chat_id: String,
    send_timeout: Duration,
}

impl TelegramApi {
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: format!(
                "{}/bot{}",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
            send_timeout: Duration::from_secs(10),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&payload)
            .timeout(self.send_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiResponse<serde_json::Value> = response.json().await?;
        if !envelope.ok {
            return Err(NotifyError::Rejected(
                envelope.description.unwrap_or_else(|| "no description".into()),
            ));
        }

        tracing::info!("Telegram message delivered");
        Ok(())
    }

    /// Long-poll for updates after `offset`. `None` when an accepted
    /// response carries no result.
    pub async fn get_updates(&self, offset: i64, poll_timeout: Duration) -> Result<Option<Vec<Update>>, NotifyError> {
        let response = self
            .client
            .get(format!("{}/getUpdates", self.base_url))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", poll_timeout.as_secs().to_string()),
            ])
            .timeout(poll_timeout + Duration::from_secs(20))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiResponse<Vec<Update>> = response.json().await?;
        if !envelope.ok {
            return Err(NotifyError::Rejected(
                envelope.description.unwrap_or_else(|| "no description".into()),
            ));
        }
        Ok(envelope.result)
    }
}

/// Notifier delivering to a single Telegram chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    api: TelegramApi,
}

impl TelegramNotifier {
    pub fn new(api: TelegramApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        self.api.send_message(text).await
    }
}
