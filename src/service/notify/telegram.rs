//! Telegram notification integration for homework-bot.
//!
//! A thin wrapper around `teloxide`'s bot client: it only ever sends plain
//! text to a single, preconfigured chat.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::{
    Bot,
    prelude::Requester,
    types::{ChatId, Recipient},
};
use tracing::{debug, instrument};

use crate::base::types::{PollError, Void};

use super::{GenericNotifyClient, NotifyClient};

// Extra methods on `NotifyClient` applied by the telegram implementation.

impl NotifyClient {
    /// Creates a new Telegram notification client.
    pub fn telegram(token: &str, chat_id: &str) -> Self {
        let client = TelegramNotifyClient::new(token, chat_id);
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Telegram client implementation.
#[derive(Clone)]
struct TelegramNotifyClient {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifyClient {
    /// Create a new Telegram client.
    #[instrument(name = "TelegramNotifyClient::new", skip_all)]
    fn new(token: &str, chat_id: &str) -> Self {
        let bot = Bot::new(token);
        let recipient = parse_recipient(chat_id);

        debug!("Telegram bot initialized for {:?}", recipient);

        Self { bot, recipient }
    }
}

#[async_trait]
impl GenericNotifyClient for TelegramNotifyClient {
    #[instrument(skip(self))]
    async fn send_message(&self, text: &str) -> Void {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map_err(|e| PollError::Delivery(e.to_string()))?;

        debug!("Message delivered to {:?}", self.recipient);

        Ok(())
    }
}

// Helpers.

/// Parse a chat id: numeric ids address chats directly, anything else is a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();

    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}

// Tests.
