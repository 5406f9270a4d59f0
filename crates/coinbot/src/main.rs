use anyhow::Result;
use dotenvy::dotenv;

use coinbot::app::run_bot;
use coinbot::cli::{Cli, Commands};
use coinbot::logging::log_startup_configuration;
use coinbot::{init_logger, BotConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics instead of letting them vanish with the task that raised them
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("Panic caught: {}", panic_info);
        if let Some(location) = panic_info.location() {
            tracing::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = BotConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::PrintConfig) => {
            println!("{}", config);
            Ok(())
        }
        Some(Commands::Run { no_webhook_setup }) => {
            init_logger(config.log_file.as_deref())?;
            log_startup_configuration(&config);
            run_bot(config, !no_webhook_setup).await?;
            Ok(())
        }
        None => {
            init_logger(config.log_file.as_deref())?;
            tracing::info!("No command specified, running bot in default mode");
            log_startup_configuration(&config);
            run_bot(config, true).await?;
            Ok(())
        }
    }
}
