//! coinbot: Telegram webhook transport around [`coincore`]
//!
//! # Module Structure
//!
//! - `config`: layered settings (defaults, TOML file, environment)
//! - `logging`: tracing subscriber setup
//! - `telegram`: bot creation, update conversion, keyboards, reply sink
//! - `server`: axum router (liveness, health, metrics, webhook)
//! - `app`: process wiring for `coinbot run`

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod telegram;

pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use logging::init_logger;
