//! HTTP API handlers.

use super::types::*;
use crate::error::WebhookError;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gateway_client::signature;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state for handlers.
pub struct AppState {
    secret: SecretString,
}

impl AppState {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }
}

/// Create the webhook router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/webhook", post(payment_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(StatusResponse::ok())
}

/// Gateway payment confirmation.
///
/// A valid signature is only acknowledged and logged; no order state
/// exists to update.
async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> Result<Json<StatusResponse>, WebhookError> {
    let (order_id, amount) = confirm(&state, payload).inspect_err(|e| {
        warn!("Rejected webhook: {}", e);
    })?;

    info!("Payment confirmed: order {} amount {}", order_id, amount);
    Ok(Json(StatusResponse::ok()))
}

/// Check a callback and return its signed order id and amount.
fn confirm(
    state: &AppState,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> Result<(String, String), WebhookError> {
    let Json(payload) = payload.map_err(|e| WebhookError::InvalidBody(e.body_text()))?;

    let order_id = required_text(payload.order_id.as_ref(), "order_id")?;
    let amount = required_text(payload.amount.as_ref(), "amount")?;
    let sign = payload.sign.ok_or(WebhookError::MissingField("sign"))?;

    if !signature::verify(&order_id, &amount, &sign, state.secret.expose_secret()) {
        return Err(WebhookError::BadSignature);
    }

    Ok((order_id, amount))
}

fn required_text(
    value: Option<&serde_json::Value>,
    field: &'static str,
) -> Result<String, WebhookError> {
    match value {
        None | Some(serde_json::Value::Null) => Err(WebhookError::MissingField(field)),
        Some(value) => signed_text(value).ok_or(WebhookError::InvalidField(field)),
    }
}
