//! Package menu - lists the catalog as buttons.

use crate::catalog::{MENU_ACTION, PACKAGES};
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use session_store::SessionStore;
use telegram_client::{BotEvent, InlineKeyboardButton, InlineKeyboardMarkup, Reply};

pub struct MenuHandler {
    sessions: SessionStore,
}

impl MenuHandler {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }
}

/// One button per catalog entry.
pub fn package_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(
        PACKAGES
            .iter()
            .map(|p| InlineKeyboardButton::callback(p.label(), p.action())),
    )
}

#[async_trait]
impl CommandHandler for MenuHandler {
    fn name(&self) -> &str {
        "menu"
    }

    fn matches(&self, event: &BotEvent) -> bool {
        event.as_action() == Some(MENU_ACTION)
    }

    async fn execute(&self, event: &BotEvent) -> AppResult<Option<Reply>> {
        self.sessions.acquire(event.user_id).await.open_menu();

        Ok(Some(
            Reply::text("Choose a UC package:").keyboard(package_keyboard()),
        ))
    }
}
