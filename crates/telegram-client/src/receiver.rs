//! Update receiver with long polling.

use crate::client::TelegramClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Pause after a failed poll before trying again.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Update receiver that long-polls `getUpdates`.
pub struct UpdateReceiver {
    client: TelegramClient,
    offset: Option<i64>,
}

impl UpdateReceiver {
    /// Create a new update receiver.
    pub fn new(client: TelegramClient) -> Self {
        Self {
            client,
            offset: None,
        }
    }

    /// Start receiving events as an async stream.
    ///
    /// Every fetched update advances the offset, including ones that do not
    /// map to a `BotEvent`, so Telegram never redelivers them.
    pub fn stream(mut self) -> impl Stream<Item = BotEvent> {
        async_stream::stream! {
            loop {
                match self.client.get_updates(self.offset).await {
                    Ok(updates) => {
                        for update in updates {
                            self.offset = Some(update.update_id + 1);
                            if let Some(event) = BotEvent::from_update(&update) {
                                debug!("Received {:?} from {}", event.kind, event.user_id);
                                yield event;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        sleep(ERROR_BACKOFF).await;
                    }
                }
            }
        }
    }
}
