//! Bot command handlers.

mod menu;
mod order;
mod select;
mod start;

pub use menu::MenuHandler;
pub use order::OrderHandler;
pub use select::SelectPackageHandler;
pub use start::StartHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use telegram_client::{BotEvent, Reply};

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handler name for logs.
    fn name(&self) -> &str;

    /// Check if this handler wants the event.
    fn matches(&self, event: &BotEvent) -> bool;

    /// Handle the event. `None` means stay silent.
    async fn execute(&self, event: &BotEvent) -> AppResult<Option<Reply>>;
}
