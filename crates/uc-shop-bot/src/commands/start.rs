//! Start command - welcome message with the buy button.

use crate::catalog::MENU_ACTION;
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use telegram_client::{BotEvent, InlineKeyboardButton, InlineKeyboardMarkup, Reply};

pub struct StartHandler {
    shop_name: String,
}

impl StartHandler {
    pub fn new(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    fn name(&self) -> &str {
        "start"
    }

    fn matches(&self, event: &BotEvent) -> bool {
        // Deep links arrive as "/start <payload>".
        event
            .as_text()
            .is_some_and(|text| text == "/start" || text.starts_with("/start "))
    }

    async fn execute(&self, _event: &BotEvent) -> AppResult<Option<Reply>> {
        let keyboard = InlineKeyboardMarkup::single_column([InlineKeyboardButton::callback(
            "💎 Buy UC",
            MENU_ACTION,
        )]);

        Ok(Some(
            Reply::text(format!("Welcome to {}!", self.shop_name)).keyboard(keyboard),
        ))
    }
}
