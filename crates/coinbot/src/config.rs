//! Configuration loading
//!
//! Layers, lowest priority first:
//! 1. built-in defaults
//! 2. optional TOML file (`coinbot.toml` unless `--config` says otherwise)
//! 3. environment variables
//!
//! | Env var                                   | Key                    |
//! |-------------------------------------------|------------------------|
//! | `BOT_TOKEN` (or `TELOXIDE_TOKEN`)         | `bot_token`            |
//! | `ADMIN_ID` (or `ADMIN_USER_ID`)           | `admin_id`             |
//! | `ADMIN_IDS` (comma separated)             | `admin_ids`            |
//! | `PORT`                                    | `port`                 |
//! | `WEBHOOK_URL`                             | `webhook_url`          |
//! | `RENDER_EXTERNAL_HOSTNAME`                | `public_host`          |
//! | `BOT_API_URL`                             | `bot_api_url`          |
//! | `LOG_FILE_PATH`                           | `log_file`             |
//! | `REQUEST_TIMEOUT_SECS`                    | `request_timeout_secs` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use coincore::AdminGate;

use crate::error::{BotError, BotResult};

pub const DEFAULT_CONFIG_FILE: &str = "coinbot.toml";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shape of the merged configuration before validation.
#[derive(Debug, Deserialize, Serialize)]
struct RawConfig {
    bot_token: Option<String>,
    admin_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    admin_ids: Vec<i64>,
    port: u16,
    webhook_url: Option<String>,
    public_host: Option<String>,
    bot_api_url: Option<String>,
    log_file: Option<PathBuf>,
    request_timeout_secs: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            admin_id: None,
            admin_ids: Vec::new(),
            port: DEFAULT_PORT,
            webhook_url: None,
            public_host: None,
            bot_api_url: None,
            log_file: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Accepts `[1, 2]`, `7` or `"1, 2"`.
fn deserialize_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ids {
        Many(Vec<i64>),
        One(i64),
        Csv(String),
    }

    match Ids::deserialize(deserializer)? {
        Ids::Many(ids) => Ok(ids),
        Ids::One(id) => Ok(vec![id]),
        Ids::Csv(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i64>().map_err(serde::de::Error::custom))
            .collect(),
    }
}

fn env_key(name: &str) -> Option<&'static str> {
    match name.to_ascii_uppercase().as_str() {
        "BOT_TOKEN" => Some("bot_token"),
        "ADMIN_ID" => Some("admin_id"),
        "ADMIN_IDS" => Some("admin_ids"),
        "PORT" => Some("port"),
        "WEBHOOK_URL" => Some("webhook_url"),
        "RENDER_EXTERNAL_HOSTNAME" => Some("public_host"),
        "BOT_API_URL" => Some("bot_api_url"),
        "LOG_FILE_PATH" => Some("log_file"),
        "REQUEST_TIMEOUT_SECS" => Some("request_timeout_secs"),
        _ => None,
    }
}

/// Builds the layered figment. Exposed so callers can add providers.
pub fn figment(config_file: &Path) -> Figment {
    Figment::from(Serialized::defaults(RawConfig::default()))
        .merge(Toml::file(config_file))
        // Fallback spellings go first so the primary names win.
        .merge(Env::raw().only(&["TELOXIDE_TOKEN"]).map(|_| "bot_token".into()))
        .merge(Env::raw().only(&["ADMIN_USER_ID"]).map(|_| "admin_id".into()))
        .merge(Env::raw().filter_map(|key| env_key(key.as_str()).map(Into::into)))
}

/// Validated runtime configuration of the bot process.
#[derive(Debug)]
pub struct BotConfig {
    pub bot_token: SecretString,
    pub admin_id: Option<i64>,
    pub admin_ids: Vec<i64>,
    pub port: u16,
    pub webhook_url: Option<String>,
    pub public_host: Option<String>,
    pub bot_api_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl TryFrom<RawConfig> for BotConfig {
    type Error = BotError;

    fn try_from(raw: RawConfig) -> BotResult<Self> {
        let bot_token = raw
            .bot_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(BotError::MissingSetting("BOT_TOKEN"))?;

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            admin_id: raw.admin_id,
            admin_ids: raw.admin_ids,
            port: raw.port,
            webhook_url: raw.webhook_url.filter(|url| !url.is_empty()),
            public_host: raw.public_host.filter(|host| !host.is_empty()),
            bot_api_url: raw.bot_api_url.filter(|url| !url.is_empty()),
            log_file: raw.log_file,
            request_timeout_secs: raw.request_timeout_secs,
        })
    }
}

impl BotConfig {
    /// Loads configuration from `config_file` (if it exists) and the environment.
    pub fn load(config_file: &Path) -> BotResult<Self> {
        Self::from_figment(&figment(config_file))
    }

    pub fn from_figment(figment: &Figment) -> BotResult<Self> {
        let raw: RawConfig = figment.extract()?;
        Self::try_from(raw)
    }

    /// Admin set: every id in `admin_ids` plus `admin_id`.
    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(self.admin_ids.iter().copied().chain(self.admin_id))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL path Telegram posts updates to: `/<bot token>`.
    pub fn webhook_path(&self) -> String {
        format!("/{}", self.bot_token.expose_secret())
    }

    /// Public base URL of this service, if known.
    pub fn webhook_base(&self) -> Option<String> {
        self.webhook_url
            .clone()
            .or_else(|| self.public_host.as_ref().map(|host| format!("https://{}", host)))
    }

    /// Full webhook URL to register with Telegram.
    pub fn webhook_endpoint(&self) -> BotResult<Option<Url>> {
        let Some(base) = self.webhook_base() else {
            return Ok(None);
        };
        let url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), self.webhook_path()))?;
        Ok(Some(url))
    }
}

/// Printable summary with the token redacted.
impl fmt::Display for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bot_token            = <redacted>")?;
        writeln!(f, "admins               = {}", self.admin_gate().len())?;
        writeln!(f, "port                 = {}", self.port)?;
        writeln!(
            f,
            "webhook_base         = {}",
            self.webhook_base().as_deref().unwrap_or("<not set>")
        )?;
        writeln!(
            f,
            "bot_api_url          = {}",
            self.bot_api_url.as_deref().unwrap_or("<default>")
        )?;
        writeln!(
            f,
            "log_file             = {}",
            self.log_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<stdout only>".to_string())
        )?;
        write!(f, "request_timeout_secs = {}", self.request_timeout_secs)
    }
}
