//! Package selection - remembers the package and asks for the player ID.

use crate::catalog::{BUY_PREFIX, MENU_ACTION};
use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use session_store::SessionStore;
use telegram_client::{BotEvent, Reply};
use tracing::info;

pub struct SelectPackageHandler {
    sessions: SessionStore,
}

impl SelectPackageHandler {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl CommandHandler for SelectPackageHandler {
    fn name(&self) -> &str {
        "select_package"
    }

    fn matches(&self, event: &BotEvent) -> bool {
        event
            .as_action()
            .is_some_and(|data| data.starts_with(BUY_PREFIX) && data != MENU_ACTION)
    }

    async fn execute(&self, event: &BotEvent) -> AppResult<Option<Reply>> {
        let Some(package_id) = event
            .as_action()
            .and_then(|data| data.strip_prefix(BUY_PREFIX))
        else {
            return Ok(None);
        };

        // Unknown ids are stored as-is and rejected at price lookup.
        self.sessions
            .acquire(event.user_id)
            .await
            .select_package(package_id);

        info!("User {} selected package {}", event.user_id, package_id);

        // Plain text reply: the id is shown verbatim, never parsed as HTML.
        Ok(Some(Reply::text(format!(
            "Enter your PUBG ID for {} UC:",
            package_id
        ))))
    }
}
