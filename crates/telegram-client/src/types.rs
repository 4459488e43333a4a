//! Telegram Bot API types.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Incoming update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub date: i64,
    pub text: Option<String>,
}

/// Inline keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    /// Button that sends `data` back as a callback query.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// One button per row.
    pub fn single_column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|b| vec![b]).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkPreviewOptions {
    pub is_disabled: bool,
}

/// Outgoing `sendMessage` request.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQueryRequest {
    pub callback_query_id: String,
}

/// Message the bot wants to send back to a chat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub html: bool,
    pub disable_preview: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    pub fn keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_preview = true;
        self
    }

    /// Build the `sendMessage` payload for a chat.
    pub fn to_request(&self, chat_id: i64) -> SendMessageRequest {
        SendMessageRequest {
            chat_id,
            text: self.text.clone(),
            parse_mode: self.html.then_some(ParseMode::Html),
            reply_markup: self.keyboard.clone(),
            link_preview_options: self
                .disable_preview
                .then_some(LinkPreviewOptions { is_disabled: true }),
        }
    }
}

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Plain text or a `/command`.
    Text(String),
    /// Inline button press carrying its callback data.
    Action { callback_id: String, data: String },
}

/// Parsed update for bot processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotEvent {
    /// Telegram user who triggered the event.
    pub user_id: i64,
    /// Chat to reply into.
    pub chat_id: i64,
    pub kind: EventKind,
}

impl BotEvent {
    pub fn text(user_id: i64, chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn action(
        user_id: i64,
        chat_id: i64,
        callback_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            chat_id,
            kind: EventKind::Action {
                callback_id: callback_id.into(),
                data: data.into(),
            },
        }
    }

    /// Extract a bot event from an update. Updates without text or
    /// callback data (stickers, joins, edits) yield `None`.
    pub fn from_update(update: &Update) -> Option<Self> {
        if let Some(query) = &update.callback_query {
            let data = query.data.clone()?;
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(Self::action(query.from.id, chat_id, query.id.clone(), data));
        }

        let message = update.message.as_ref()?;
        let from = message.from.as_ref()?;
        let text = message.text.clone()?;
        Some(Self::text(from.id, message.chat.id, text))
    }

    /// Message text, if this is a text event.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Text(text) => Some(text),
            EventKind::Action { .. } => None,
        }
    }

    /// Callback data, if this is a button press.
    pub fn as_action(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Action { data, .. } => Some(data),
            EventKind::Text(_) => None,
        }
    }

    /// Callback query id that must be answered.
    pub fn callback_id(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Action { callback_id, .. } => Some(callback_id),
            EventKind::Text(_) => None,
        }
    }
}
