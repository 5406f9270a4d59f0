//! Replies and menu descriptors handed back to the transport

pub const LABEL_WALLET: &str = "💰 Wallet";
pub const LABEL_BALANCE: &str = "🪙 Balance";
pub const LABEL_PREMIUM: &str = "⭐ Premium";
pub const LABEL_PLAY: &str = "🎮 Play";
pub const LABEL_HELP: &str = "ℹ️ Help";

pub const CALLBACK_PLAY: &str = "play";
pub const CALLBACK_WALLET: &str = "wallet";
pub const CALLBACK_BALANCE: &str = "balance";
pub const CALLBACK_ADMIN_STATS: &str = "admin:stats";
pub const CALLBACK_ADMIN_USAGE: &str = "admin:give";
pub const CALLBACK_MAIN_MENU: &str = "menu:main";

/// Reply keyboard rows of the main menu.
pub const MAIN_MENU_ROWS: &[&[&str]] = &[
    &[LABEL_WALLET, LABEL_BALANCE],
    &[LABEL_PLAY, LABEL_PREMIUM],
    &[LABEL_HELP],
];

/// Inline button rows of the admin menu as `(label, callback id)`.
pub const ADMIN_MENU_ROWS: &[&[(&str, &str)]] = &[
    &[("📊 Stats", CALLBACK_ADMIN_STATS), ("🎁 Give coins", CALLBACK_ADMIN_USAGE)],
    &[("⬅️ Main menu", CALLBACK_MAIN_MENU)],
];

/// Which keyboard the transport should attach. The core only names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    Main,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }

    /// Generic reply for faults that escaped a handler.
    pub fn internal_error() -> Self {
        Self::plain("⚠️ Something went wrong. Please try again later.")
    }
}
