//! Common test utilities for integration tests.

#![allow(dead_code)]

use gateway_client::GatewayClient;
use session_store::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use telegram_client::TelegramClient;
use uc_shop_bot::Dispatcher;
use wiremock::MockServer;

pub const USER: i64 = 42;

/// Create a gateway client configured for a mock server.
pub fn test_gateway_client(mock_server: &MockServer) -> GatewayClient {
    GatewayClient::new(
        "test-api-key",
        mock_server.uri(),
        "shop-1",
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Create a Telegram client configured for a mock server.
pub fn test_telegram_client(mock_server: &MockServer) -> TelegramClient {
    TelegramClient::new(mock_server.uri(), "test-token", Duration::from_secs(1)).unwrap()
}

/// The shop's dispatcher wired to a mock gateway.
pub fn test_dispatcher(sessions: &SessionStore, gateway_server: &MockServer) -> Dispatcher {
    Dispatcher::shop(
        sessions.clone(),
        Arc::new(test_gateway_client(gateway_server)),
        "UC SHOP",
        "ucshop.pro",
    )
}
