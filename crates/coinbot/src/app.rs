//! Process wiring for `coinbot run`

use std::sync::Arc;

use coincore::Engine;
use tokio::signal;

use crate::config::BotConfig;
use crate::error::BotResult;
use crate::server::{self, AppState};
use crate::telegram::{create_bot, register_webhook, setup_bot_commands, TelegramSink};

/// Builds the engine and the Telegram client, registers the webhook and
/// serves HTTP until Ctrl+C.
pub async fn run_bot(config: BotConfig, setup_webhook: bool) -> BotResult<()> {
    let bot = create_bot(&config)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        tracing::warn!(error = %e, "Failed to set bot commands");
    }

    if setup_webhook {
        register_webhook(&bot, &config).await?;
    } else {
        tracing::info!("Webhook setup skipped (--no-webhook-setup)");
    }

    let engine = Arc::new(Engine::new(config.admin_gate()));
    let port = config.port;
    let state = AppState::new(engine, Arc::new(TelegramSink::new(bot)), config.bot_token);

    server::serve(state, port, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
