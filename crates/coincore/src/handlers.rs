//! Route handlers
//!
//! Each handler takes a [`Context`] and returns a [`Reply`] or a
//! [`CoreError`]. The engine converts errors into replies, so handlers just
//! use `?` on validation and capability checks.

use indoc::formatdoc;

use crate::account::Account;
use crate::admin::AdminGate;
use crate::dice::RandomSource;
use crate::error::{CoreError, CoreResult};
use crate::reply::{Menu, Reply};
use crate::router::{admin_commands, public_commands, Route};
use crate::store::UserStore;

/// Lowest and highest face of the game die.
pub const DIE_FACES: (u32, u32) = (1, 5);
/// Draws up to this value win.
pub const WINNING_MAX: u32 = 2;
pub const WIN_REWARD: u64 = 10;
pub const LOSS_PENALTY: u64 = 5;

pub const GIVE_USAGE: &str = "Usage: /give <user_id> <amount>";
pub const SET_PREMIUM_USAGE: &str = "Usage: /setpremium <user_id> <on|off>";
pub const LOOKUP_USAGE: &str = "Usage: /user <user_id>";

pub const FALLBACK_TEXT: &str = "🤔 Sorry, I didn't understand that. Use /help to see what I can do.";

/// Everything a handler may touch while serving one event.
pub struct Context<'a> {
    pub store: &'a UserStore,
    pub gate: &'a AdminGate,
    pub dice: &'a dyn RandomSource,
    pub sender: i64,
    /// Text following the command token, empty for buttons and callbacks
    pub args: &'a str,
}

pub type HandlerFn = fn(&Context<'_>) -> CoreResult<Reply>;

/// Maps a route to its handler.
pub fn handler_for(route: Route) -> HandlerFn {
    match route {
        Route::Welcome => welcome,
        Route::Help => help,
        Route::WalletView => wallet_view,
        Route::BalanceView => balance_view,
        Route::PremiumView => premium_view,
        Route::PlayGame => play_game,
        Route::AdminPanel => admin_panel,
        Route::Give => give,
        Route::SetPremium => set_premium,
        Route::AdminStats => admin_stats,
        Route::AdminLookup => admin_lookup,
        Route::AdminUsage => admin_usage,
        Route::Fallback => fallback,
    }
}

fn welcome(cx: &Context<'_>) -> CoreResult<Reply> {
    let account = cx.store.ensure(cx.sender);
    let text = formatdoc! {"
        👋 Welcome, {user}!

        🪙 You have {coins} coins.
        Use the menu below or /help to see what I can do.",
        user = cx.sender,
        coins = account.coins,
    };
    Ok(Reply::with_menu(text, Menu::Main))
}

fn help(_cx: &Context<'_>) -> CoreResult<Reply> {
    let mut text = String::from("ℹ️ Help Section\n");
    for spec in public_commands() {
        text.push('\n');
        text.push_str(&spec.help_line());
    }
    Ok(Reply::with_menu(text, Menu::Main))
}

fn wallet_view(cx: &Context<'_>) -> CoreResult<Reply> {
    let account = cx.store.ensure(cx.sender);
    Ok(Reply::plain(format!("💼 Your wallet\n\n{}", account.wallet.format_balances())))
}

fn balance_view(cx: &Context<'_>) -> CoreResult<Reply> {
    let account = cx.store.ensure(cx.sender);
    Ok(Reply::plain(format!("🪙 Balance: {} coins", account.coins)))
}

fn premium_view(cx: &Context<'_>) -> CoreResult<Reply> {
    let account = cx.store.ensure(cx.sender);
    Ok(Reply::plain(format!("⭐ Premium: {}", account.premium_label())))
}

/// Result of one round of the coin game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win { gained: u64 },
    Loss { lost: u64 },
}

/// Applies a drawn value to an account. {1,2} wins, {3,4,5} loses.
pub fn settle_round(account: &mut Account, draw: u32) -> GameOutcome {
    if draw <= WINNING_MAX {
        account.coins = account.coins.saturating_add(WIN_REWARD);
        GameOutcome::Win { gained: WIN_REWARD }
    } else {
        let lost = LOSS_PENALTY.min(account.coins);
        account.coins -= lost;
        GameOutcome::Loss { lost }
    }
}

fn play_game(cx: &Context<'_>) -> CoreResult<Reply> {
    let (low, high) = DIE_FACES;
    let draw = cx.dice.draw(low, high);
    let (outcome, coins) = cx.store.update(cx.sender, |account| {
        let outcome = settle_round(account, draw);
        (outcome, account.coins)
    });
    tracing::debug!(user_id = cx.sender, draw, ?outcome, coins, "game round settled");

    let text = match outcome {
        GameOutcome::Win { gained } => {
            format!("🎲 You rolled {}!\n🎉 You won {} coins!\n🪙 Balance: {}", draw, gained, coins)
        }
        GameOutcome::Loss { lost } => {
            format!("🎲 You rolled {}.\n😢 You lost {} coins.\n🪙 Balance: {}", draw, lost, coins)
        }
    };
    Ok(Reply::plain(text))
}

fn admin_panel(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    Ok(Reply::with_menu(
        format!("🛠 Admin panel\n\n👥 Accounts: {}", cx.store.len()),
        Menu::Admin,
    ))
}

/// Splits exactly two whitespace-separated arguments.
fn two_args<'a>(args: &'a str, usage: &str) -> CoreResult<(&'a str, &'a str)> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(CoreError::Validation(usage.to_string())),
    }
}

fn parse_int(raw: &str, usage: &str) -> CoreResult<i64> {
    raw.parse::<i64>().map_err(|_| CoreError::Validation(usage.to_string()))
}

fn give(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    let (target, amount) = two_args(cx.args, GIVE_USAGE)?;
    let target = parse_int(target, GIVE_USAGE)?;
    let amount = parse_int(amount, GIVE_USAGE)?;

    cx.store.ensure(target);
    let balance = cx.store.adjust_coins(target, amount)?;
    tracing::info!(admin = cx.sender, target, amount, balance, "admin gave coins");

    Ok(Reply::plain(format!(
        "✅ Gave {} coins to {}.\n🪙 New balance: {}",
        amount, target, balance
    )))
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn set_premium(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    let (target, switch) = two_args(cx.args, SET_PREMIUM_USAGE)?;
    let target = parse_int(target, SET_PREMIUM_USAGE)?;
    let premium = parse_switch(switch).ok_or_else(|| CoreError::Validation(SET_PREMIUM_USAGE.to_string()))?;

    let account = cx.store.set_premium(target, premium);
    tracing::info!(admin = cx.sender, target, premium, "admin changed premium flag");

    Ok(Reply::plain(format!("✅ Premium for {}: {}", target, account.premium_label())))
}

fn admin_stats(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    Ok(Reply::plain(format!(
        "📊 Ledger statistics\n\n👥 Accounts: {}\n🪙 Coins in circulation: {}\n⭐ Premium accounts: {}",
        cx.store.len(),
        cx.store.total_coins(),
        cx.store.premium_count()
    )))
}

fn admin_lookup(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    let mut parts = cx.args.split_whitespace();
    let target = match (parts.next(), parts.next()) {
        (Some(raw), None) => parse_int(raw, LOOKUP_USAGE)?,
        _ => return Err(CoreError::Validation(LOOKUP_USAGE.to_string())),
    };

    let account = cx.store.get(target)?;
    Ok(Reply::plain(format!(
        "👤 Account {}\n\n🪙 Coins: {}\n⭐ Premium: {}\n\n{}",
        target,
        account.coins,
        account.premium_label(),
        account.wallet.format_balances()
    )))
}

fn admin_usage(cx: &Context<'_>) -> CoreResult<Reply> {
    cx.gate.require(cx.sender)?;
    let mut text = String::from("🛠 Admin commands\n");
    for spec in admin_commands() {
        text.push('\n');
        text.push_str(&spec.help_line());
    }
    Ok(Reply::with_menu(text, Menu::Admin))
}

fn fallback(_cx: &Context<'_>) -> CoreResult<Reply> {
    Ok(Reply::with_menu(FALLBACK_TEXT, Menu::Main))
}
