//! Telegram `getUpdates` long-poll as a command source.

use async_trait::async_trait;
use std::time::Duration;

use crate::commands::{CommandError, CommandSource, IncomingCommand};
use crate::notify::telegram::{TelegramApi, Update};

pub struct TelegramCommandSource {
    api: TelegramApi,
    poll_timeout: Duration,
    last_update_id: i64,
}

impl TelegramCommandSource {
    pub fn new(api: TelegramApi, poll_timeout: Duration) -> Self {
        Self {
            api,
            poll_timeout,
            last_update_id: 0,
        }
    }

    /// Advance the offset past every update, keep only text messages.
    fn absorb(&mut self, updates: Vec<Update>) -> Vec<IncomingCommand> {
        let mut commands = Vec::new();
        for update in updates {
            self.last_update_id = self.last_update_id.max(update.update_id);
            if let Some(message) = update.message {
                commands.push(IncomingCommand {
                    sender: message.chat.id.to_string(),
                    text: message.text,
                });
            }
        }
        commands
    }
}

#[async_trait]
impl CommandSource for TelegramCommandSource {
    async fn next_batch(&mut self) -> Result<Vec<IncomingCommand>, CommandError> {
        let updates = self
            .api
            .get_updates(self.last_update_id + 1, self.poll_timeout)
            .await?
            .ok_or_else(|| CommandError::Unavailable("getUpdates returned no result".into()))?;
        Ok(self.absorb(updates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TelegramConfig;
    use crate::notify::telegram::{Chat, Message};

    fn update(id: i64, chat: i64, text: &str) -> Update {
        Update {
            update_id: id,
            message: Some(Message {
                chat: Chat { id: chat },
                text: text.into(),
            }),
        }
    }

    #[test]
    fn test_offset_advances_past_all_updates() {
        let config = TelegramConfig {
            bot_token: "t".into(),
            chat_id: "1".into(),
            ..Default::default()
        };
        let api = TelegramApi::new(&config).unwrap();
        let mut source = TelegramCommandSource::new(api, Duration::from_secs(10));

        let commands = source.absorb(vec![
            update(5, 1, "/status"),
            Update { update_id: 6, message: None },
            update(4, -99, "hi"),
        ]);

        assert_eq!(source.last_update_id, 6);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], IncomingCommand { sender: "1".into(), text: "/status".into() });
        assert_eq!(commands[1].sender, "-99");
    }
}
