//! Telegram transport: bot setup, update conversion, keyboards, replies

pub mod bot;
pub mod keyboard;
pub mod sink;
pub mod update;

pub use bot::{create_bot, register_webhook, setup_bot_commands};
pub use sink::{ReplySink, TelegramSink};
pub use update::{incoming_from_update, Incoming};
pub use teloxide::Bot;
