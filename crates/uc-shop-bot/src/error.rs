//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram_client::TelegramError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] gateway_client::GatewayError),

    #[error("Webhook server error: {0}")]
    Server(#[from] webhook_server::ServerError),

    #[error("Unknown package: {0}")]
    UnknownPackage(String),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
