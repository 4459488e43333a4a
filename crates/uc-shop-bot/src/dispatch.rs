//! Event routing and the Telegram listener loop.

use crate::commands::*;
use gateway_client::PaymentGateway;
use session_store::SessionStore;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use telegram_client::{BotEvent, Reply, TelegramClient, UpdateReceiver};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

pub const GENERIC_ERROR: &str = "Sorry, something went wrong.";

/// Routes each event to the first handler that matches it.
pub struct Dispatcher {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Dispatcher {
    pub fn new(handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { handlers }
    }

    /// The shop's handler set. Order matters: `/start` and `buy_menu` must
    /// be seen before the catch-all text and `buy_` handlers.
    pub fn shop(
        sessions: SessionStore,
        gateway: Arc<dyn PaymentGateway>,
        shop_name: &str,
        email_domain: &str,
    ) -> Self {
        Self::new(vec![
            Box::new(StartHandler::new(shop_name)),
            Box::new(MenuHandler::new(sessions.clone())),
            Box::new(SelectPackageHandler::new(sessions.clone())),
            Box::new(OrderHandler::new(sessions, gateway, email_domain)),
        ])
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Handle one event and return what to send back, if anything.
    pub async fn dispatch(&self, event: &BotEvent) -> Option<Reply> {
        let handler = self.handlers.iter().find(|h| h.matches(event))?;
        debug!("Dispatching to {} handler", handler.name());

        match handler.execute(event).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Handler {} error: {}", handler.name(), e);
                Some(Reply::text(GENERIC_ERROR))
            }
        }
    }
}

/// Handle one event end to end: dispatch, reply, acknowledge the button.
pub async fn handle_event(telegram: &TelegramClient, dispatcher: &Dispatcher, event: BotEvent) {
    if let Some(reply) = dispatcher.dispatch(&event).await {
        if let Err(e) = telegram.reply(&event, &reply).await {
            error!("Failed to send reply: {}", e);
        }
    }

    if let Some(callback_id) = event.callback_id() {
        if let Err(e) = telegram.answer_callback(callback_id).await {
            warn!("Failed to answer callback: {}", e);
        }
    }
}

/// Spawns work per user so that one user's tasks run in the order they
/// were submitted while different users run concurrently.
#[derive(Default)]
pub struct UserLanes {
    tails: HashMap<i64, JoinHandle<()>>,
}

impl UserLanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after every task already submitted for `user_id`.
    pub fn spawn<F>(&mut self, user_id: i64, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tails.retain(|_, handle| !handle.is_finished());

        let previous = self.tails.remove(&user_id);
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    warn!("Previous event task failed: {}", e);
                }
            }
            task.await;
        });
        self.tails.insert(user_id, handle);
    }

    /// Users with a task still queued or running.
    pub fn busy_users(&self) -> usize {
        self.tails.values().filter(|h| !h.is_finished()).count()
    }
}

/// Poll Telegram forever, handling every event in its own task.
pub async fn run_listener(telegram: TelegramClient, dispatcher: Arc<Dispatcher>) {
    info!("Listening for updates...");

    let receiver = UpdateReceiver::new(telegram.clone());
    let mut stream = Box::pin(receiver.stream());
    let mut lanes = UserLanes::new();

    while let Some(event) = stream.next().await {
        let telegram = telegram.clone();
        let dispatcher = dispatcher.clone();
        lanes.spawn(event.user_id, async move {
            handle_event(&telegram, &dispatcher, event).await;
        });
    }
}
