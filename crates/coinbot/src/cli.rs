use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "coinbot")]
#[command(author, version, about = "Telegram coin wallet bot served over a webhook", long_about = None)]
pub struct Cli {
    /// Optional TOML config file; environment variables override it
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the webhook (default)
    Run {
        /// Do not touch the webhook registered at Telegram
        #[arg(long)]
        no_webhook_setup: bool,
    },

    /// Print the effective configuration with secrets redacted
    PrintConfig,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
