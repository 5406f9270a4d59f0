//! Trigger → route dispatch table
//!
//! The table is built once from [`COMMANDS`], [`BUTTON_LABELS`] and
//! [`CALLBACKS`]. Resolution order for an inbound payload:
//!
//! 1. exact command token (`/give`, `/start@my_bot`, ...)
//! 2. exact reply-keyboard label
//! 3. exact callback identifier
//! 4. [`Route::Fallback`]
//!
//! The router does not look at who sent the event; admin handlers do their
//! own capability check.

use std::collections::HashMap;

use strum::{EnumIter, IntoStaticStr};

use crate::reply::{
    CALLBACK_ADMIN_STATS, CALLBACK_ADMIN_USAGE, CALLBACK_BALANCE, CALLBACK_MAIN_MENU, CALLBACK_PLAY,
    CALLBACK_WALLET, LABEL_BALANCE, LABEL_HELP, LABEL_PLAY, LABEL_PREMIUM, LABEL_WALLET,
};

/// Handler identity selected by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    Welcome,
    Help,
    WalletView,
    BalanceView,
    PremiumView,
    PlayGame,
    AdminPanel,
    Give,
    SetPremium,
    AdminStats,
    AdminLookup,
    AdminUsage,
    Fallback,
}

impl Route {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Payload of an inbound event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Any text message: a command, a keyboard label or free text
    Text(String),
    /// Data of a pressed inline button
    Callback(String),
}

/// One slash command the bot understands.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub token: &'static str,
    /// Argument placeholder, empty when the command takes none
    pub args: &'static str,
    pub route: Route,
    pub description: &'static str,
    pub admin_only: bool,
}

const fn command(
    token: &'static str,
    args: &'static str,
    route: Route,
    description: &'static str,
    admin_only: bool,
) -> CommandSpec {
    CommandSpec {
        token,
        args,
        route,
        description,
        admin_only,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    command("/start", "", Route::Welcome, "Start the bot", false),
    command("/help", "", Route::Help, "Show help", false),
    command("/wallet", "", Route::WalletView, "Show your wallet", false),
    command("/balance", "", Route::BalanceView, "Show your coin balance", false),
    command("/premium", "", Route::PremiumView, "Show premium status", false),
    command("/play", "", Route::PlayGame, "Play the coin game", false),
    command("/admin", "", Route::AdminPanel, "Open the admin panel", true),
    command("/give", "<user_id> <amount>", Route::Give, "Add coins to a user", true),
    command("/setpremium", "<user_id> <on|off>", Route::SetPremium, "Toggle premium", true),
    command("/stats", "", Route::AdminStats, "Ledger statistics", true),
    command("/user", "<user_id>", Route::AdminLookup, "Show a user's account", true),
];

impl CommandSpec {
    /// `/give <user_id> <amount> - Add coins to a user`
    pub fn help_line(&self) -> String {
        if self.args.is_empty() {
            format!("{} - {}", self.token, self.description)
        } else {
            format!("{} {} - {}", self.token, self.args, self.description)
        }
    }

    /// Command name without the leading slash, as Telegram's command menu wants it.
    pub fn name(&self) -> &'static str {
        self.token.trim_start_matches('/')
    }
}

pub const BUTTON_LABELS: &[(&str, Route)] = &[
    (LABEL_WALLET, Route::WalletView),
    (LABEL_BALANCE, Route::BalanceView),
    (LABEL_PREMIUM, Route::PremiumView),
    (LABEL_PLAY, Route::PlayGame),
    (LABEL_HELP, Route::Help),
];

pub const CALLBACKS: &[(&str, Route)] = &[
    (CALLBACK_PLAY, Route::PlayGame),
    (CALLBACK_WALLET, Route::WalletView),
    (CALLBACK_BALANCE, Route::BalanceView),
    (CALLBACK_ADMIN_STATS, Route::AdminStats),
    (CALLBACK_ADMIN_USAGE, Route::AdminUsage),
    (CALLBACK_MAIN_MENU, Route::Welcome),
];

/// Route chosen for a payload plus the text after the command token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub route: Route,
    pub args: &'a str,
}

impl Resolved<'_> {
    fn bare(route: Route) -> Self {
        Self { route, args: "" }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    commands: HashMap<&'static str, Route>,
    labels: HashMap<&'static str, Route>,
    callbacks: HashMap<&'static str, Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `/cmd@bot_name rest of text` into (`/cmd`, `rest of text`).
fn split_command(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let (head, rest) = match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    };
    let token = head.split('@').next().unwrap_or(head);
    Some((token, rest))
}

impl Router {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|spec| (spec.token, spec.route)).collect(),
            labels: BUTTON_LABELS.iter().copied().collect(),
            callbacks: CALLBACKS.iter().copied().collect(),
        }
    }

    /// Selects exactly one route for `payload`. Never fails.
    pub fn resolve<'a>(&self, payload: &'a Payload) -> Resolved<'a> {
        match payload {
            Payload::Text(text) => {
                if let Some((token, args)) = split_command(text) {
                    if let Some(&route) = self.commands.get(token) {
                        return Resolved { route, args };
                    }
                }
                if let Some(&route) = self.labels.get(text.trim()) {
                    return Resolved::bare(route);
                }
                Resolved::bare(Route::Fallback)
            }
            Payload::Callback(data) => match self.callbacks.get(data.as_str()) {
                Some(&route) => Resolved::bare(route),
                None => Resolved::bare(Route::Fallback),
            },
        }
    }
}

/// Commands shown to everyone (help text, Telegram command menu).
pub fn public_commands() -> impl Iterator<Item = &'static CommandSpec> {
    COMMANDS.iter().filter(|spec| !spec.admin_only)
}

pub fn admin_commands() -> impl Iterator<Item = &'static CommandSpec> {
    COMMANDS.iter().filter(|spec| spec.admin_only)
}
