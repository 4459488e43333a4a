//! Telegram HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Extra headroom on top of the long-poll timeout before reqwest gives up.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Telegram Bot API client.
///
/// The bot token is part of every request URL, so it is kept in a
/// `SecretString` and request methods never log the URL.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: SecretString,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// Create a new Telegram client.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        poll_timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(poll_timeout + REQUEST_SLACK)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: SecretString::new(token.into()),
            poll_timeout,
        })
    }

    /// Check that the token is valid and the API reachable.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Get the bot's own account.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates starting at `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: vec!["message".into(), "callback_query".into()],
        };

        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a message to a chat.
    #[instrument(skip(self, reply))]
    pub async fn send(&self, chat_id: i64, reply: &Reply) -> Result<Message, TelegramError> {
        let message: Message = self.call("sendMessage", &reply.to_request(chat_id)).await?;
        debug!("Sent message to chat {}", chat_id);
        Ok(message)
    }

    /// Reply into the chat an event came from.
    pub async fn reply(&self, event: &BotEvent, reply: &Reply) -> Result<Message, TelegramError> {
        self.send(event.chat_id, reply).await
    }

    /// Acknowledge a button press so the client stops its spinner.
    #[instrument(skip(self))]
    pub async fn answer_callback(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_query_id.to_string(),
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        )
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Bot token rejected by Telegram");
            return Err(TelegramError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description,
                error_code,
                ..
            } => {
                let description = description.unwrap_or_else(|| "Unknown error".into());
                warn!("{} failed: {}", method, description);
                Err(TelegramError::Api {
                    code: error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                    description,
                })
            }
        }
    }
}
