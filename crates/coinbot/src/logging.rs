//! Logger initialization (console + optional file)

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{BotError, BotResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Console output always goes to stdout. When `log_file` is set the same
/// events are also written, without colors, to that file (truncated on
/// start). Records emitted through the `log` facade (teloxide, reqwest) are
/// bridged into the subscriber.
///
/// # Errors
/// Fails when the file cannot be created or a global subscriber is already set.
pub fn init_logger(log_file: Option<&Path>) -> BotResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| BotError::Logger(format!("Failed to create log file {}: {}", path.display(), e)))?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| BotError::Logger(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Logs the effective settings once at startup.
pub fn log_startup_configuration(config: &crate::config::BotConfig) {
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!("🪙 coinbot {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!(port = config.port, "HTTP port");

    let admins = config.admin_gate();
    if admins.is_empty() {
        tracing::warn!("⚠️  No admin configured (ADMIN_ID / ADMIN_IDS); admin commands are disabled");
    } else {
        tracing::info!(count = admins.len(), "Admins configured");
    }

    match config.webhook_base() {
        Some(base) => tracing::info!(%base, "Public base URL"),
        None => tracing::warn!("⚠️  WEBHOOK_URL / RENDER_EXTERNAL_HOSTNAME not set; webhook will not be registered"),
    }

    if let Some(url) = &config.bot_api_url {
        tracing::info!(%url, "Using custom Bot API URL");
    }
}
