//! Outbound side of the bot
//!
//! The webhook handler talks to Telegram only through [`ReplySink`], so the
//! HTTP layer can be driven in tests without network access.

use async_trait::async_trait;
use coincore::Reply;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId};

use crate::error::BotResult;
use crate::telegram::keyboard;

#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Sends `reply` to `chat_id`, attaching its keyboard if any.
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> BotResult<()>;

    /// Stops the loading spinner on the pressed inline button.
    async fn ack_callback(&self, query: &CallbackQuery) -> BotResult<()>;
}

/// Sink backed by the Bot API.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn send(&self, chat_id: ChatId, reply: &Reply) -> BotResult<()> {
        let request = self.bot.send_message(chat_id, reply.text.clone());
        match reply.menu {
            Some(menu) => request.reply_markup(keyboard::render(menu)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn ack_callback(&self, query: &CallbackQuery) -> BotResult<()> {
        self.bot.answer_callback_query(query.id.clone()).await?;
        Ok(())
    }
}
