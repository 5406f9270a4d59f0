//! Renders core menu descriptors as Telegram keyboards

use coincore::reply::{ADMIN_MENU_ROWS, MAIN_MENU_ROWS};
use coincore::Menu;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup};

/// Persistent reply keyboard with the main menu labels.
pub fn main_menu() -> KeyboardMarkup {
    let rows = MAIN_MENU_ROWS
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(*label)).collect::<Vec<_>>());
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Inline keyboard attached to the admin panel message.
pub fn admin_menu() -> InlineKeyboardMarkup {
    let rows = ADMIN_MENU_ROWS.iter().map(|row| {
        row.iter()
            .map(|(label, data)| InlineKeyboardButton::callback(*label, *data))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

pub fn render(menu: Menu) -> ReplyMarkup {
    match menu {
        Menu::Main => ReplyMarkup::Keyboard(main_menu()),
        Menu::Admin => ReplyMarkup::InlineKeyboard(admin_menu()),
    }
}
