//! Telegram delivery of homework notifications.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

use homework_core::config::TELEGRAM_CHAT_ID_ENV;
use homework_core::{Config, HomeworkError, Notifier, Result};

/// Sends notifications to a single Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id` using the bot `token`.
    pub fn new(token: &str, chat_id: &str) -> Result<Self> {
        Self::with_bot(Bot::new(token), chat_id)
    }

    /// Create a notifier around an already configured bot.
    pub fn with_bot(bot: Bot, chat_id: &str) -> Result<Self> {
        Ok(Self {
            bot,
            recipient: parse_recipient(chat_id)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.telegram_token, &config.telegram_chat_id)
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.bot
            .send_message(self.recipient.clone(), message)
            .await
            .map_err(|e| HomeworkError::NotifyFailed(e.to_string()))?;
        debug!(recipient = ?self.recipient, "Message sent to Telegram");
        Ok(())
    }
}

/// Parse a chat identifier: a numeric chat id or an `@channel` username.
pub fn parse_recipient(chat_id: &str) -> Result<Recipient> {
    let chat_id = chat_id.trim();
    if let Ok(id) = chat_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    if chat_id.len() > 1 && chat_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }
    Err(HomeworkError::ConfigInvalid {
        name: TELEGRAM_CHAT_ID_ENV.to_string(),
        reason: format!("'{}' is neither a numeric chat id nor an @channel name", chat_id),
    })
}
