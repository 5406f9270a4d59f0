//! Bot instance creation and one-time Bot API setup

use coincore::router::public_commands;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use url::Url;

use crate::config::BotConfig;
use crate::error::BotResult;

/// Creates a Bot with the configured HTTP timeout and optional custom API URL.
pub fn create_bot(config: &BotConfig) -> BotResult<Bot> {
    let client = ClientBuilder::new().timeout(config.request_timeout()).build()?;
    let bot = Bot::with_client(config.bot_token.expose_secret(), client);

    match &config.bot_api_url {
        Some(api_url) => {
            tracing::info!(%api_url, "Using custom Bot API URL");
            Ok(bot.set_api_url(Url::parse(api_url)?))
        }
        None => Ok(bot),
    }
}

/// Command menu shown in Telegram clients. Admin commands stay hidden.
pub fn bot_commands() -> Vec<BotCommand> {
    public_commands()
        .map(|spec| BotCommand::new(spec.name(), spec.description))
        .collect()
}

pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(bot_commands()).await?;
    Ok(())
}

/// Points Telegram at this service.
///
/// Any previous webhook is dropped first. Without a public URL nothing is
/// registered and updates must be delivered some other way.
pub async fn register_webhook(bot: &Bot, config: &BotConfig) -> BotResult<()> {
    let Some(url) = config.webhook_endpoint()? else {
        tracing::warn!("No public URL configured, skipping webhook registration");
        return Ok(());
    };

    if let Err(e) = bot.delete_webhook().await {
        tracing::warn!(error = %e, "Failed to delete previous webhook");
    }

    bot.set_webhook(url).await?;
    // The URL embeds the token; log only the host.
    tracing::info!(host = config.webhook_base().as_deref().unwrap_or(""), "Webhook registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bot_commands_are_public_only() {
        let names: Vec<String> = bot_commands().into_iter().map(|c| c.command).collect();
        assert_eq!(names, vec!["start", "help", "wallet", "balance", "premium", "play"]);
    }
}
