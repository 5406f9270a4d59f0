use thiserror::Error;

/// Errors of the bot process: startup, configuration and Telegram I/O.
///
/// Per-update problems never surface here; the core turns them into replies
/// and the webhook always acknowledges the delivery.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration could not be read or has the wrong shape
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    /// A required setting is missing
    #[error("{0} environment variable not set")]
    MissingSetting(&'static str),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Logger could not be installed
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Type alias for Result with BotError
pub type BotResult<T> = Result<T, BotError>;
