//! Payment confirmation webhook.
//!
//! The gateway calls `POST /webhook` once a buyer has paid. The body is
//! checked against the shared signing secret and acknowledged; nothing
//! else happens with it.
//!
//! ```text
//! gateway → POST /webhook → verify md5 signature → 200 ok | 400 error
//! ```

pub mod api;
pub mod error;

pub use api::{create_router, AppState, StatusResponse, WebhookPayload};
pub use error::{ServerError, WebhookError};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Bind `addr` and serve the webhook until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: Arc<AppState>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("Webhook server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
