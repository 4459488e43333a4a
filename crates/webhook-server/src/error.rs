//! Webhook error types.

use crate::api::StatusResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Reasons a callback is rejected. The variant is for logs; every one of
/// them answers `400 {"status":"error","message":"bad signature"}`.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("bad signature")]
    BadSignature,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(StatusResponse::error(WebhookError::BadSignature.to_string())),
        )
            .into_response()
    }
}

/// Failures starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
