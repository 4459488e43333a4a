//! Player ID entry - places the order and returns the payment link.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::order::Order;
use async_trait::async_trait;
use gateway_client::PaymentGateway;
use session_store::SessionStore;
use std::sync::Arc;
use telegram_client::{BotEvent, Reply};
use tracing::{error, info};

pub const ORDER_FAILED: &str = "❌ Could not create the order. Please try again later.";

pub struct OrderHandler {
    sessions: SessionStore,
    gateway: Arc<dyn PaymentGateway>,
    email_domain: String,
}

impl OrderHandler {
    pub fn new(
        sessions: SessionStore,
        gateway: Arc<dyn PaymentGateway>,
        email_domain: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            gateway,
            email_domain: email_domain.into(),
        }
    }

    async fn request_link(&self, order: &Order) -> AppResult<String> {
        let link = self
            .gateway
            .create_order(order.price, &order.reference, &order.email)
            .await?;
        Ok(link)
    }
}

#[async_trait]
impl CommandHandler for OrderHandler {
    fn name(&self) -> &str {
        "order"
    }

    /// Any text; only acted on while a package is selected.
    fn matches(&self, event: &BotEvent) -> bool {
        event.as_text().is_some()
    }

    async fn execute(&self, event: &BotEvent) -> AppResult<Option<Reply>> {
        let Some(game_id) = event.as_text() else {
            return Ok(None);
        };

        let mut session = self.sessions.acquire(event.user_id).await;
        let Some(package_id) = session.selected_package().map(String::from) else {
            return Ok(None);
        };

        let result = match Order::new(event.user_id, &package_id, game_id, &self.email_domain) {
            Ok(order) => self.request_link(&order).await.map(|link| (order, link)),
            Err(e) => Err(e),
        };

        // The flow ends here whatever the gateway said.
        session.clear();

        let reply = match result {
            Ok((order, link)) => {
                info!("Order {} created ({} RUB)", order.reference, order.price);
                confirmation(&order, &link)
            }
            Err(e) => {
                error!("Order failed for user {}: {}", event.user_id, e);
                Reply::text(ORDER_FAILED)
            }
        };

        Ok(Some(reply))
    }
}

fn confirmation(order: &Order, link: &str) -> Reply {
    Reply::text(format!(
        "✅ Your order: <b>{} UC</b>\n\
         🎮 PUBG ID: <code>{}</code>\n\n\
         💳 Pay here:\n\
         <a href=\"{}\">Go to payment</a>",
        escape_html(&order.package_id),
        escape_html(&order.game_id),
        escape_html(link),
    ))
    .html()
    .without_preview()
}

/// Escape text for Telegram's HTML parse mode.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_client::GatewayError;
    use mockall::mock;
    use session_store::SessionState;
    use std::time::Duration;

    mock! {
        pub Gateway {}

        #[async_trait]
        impl PaymentGateway for Gateway {
            async fn create_order(
                &self,
                amount: u32,
                order_id: &str,
                email: &str,
            ) -> Result<String, GatewayError>;
        }
    }

    fn handler(sessions: &SessionStore, gateway: MockGateway) -> OrderHandler {
        OrderHandler::new(sessions.clone(), Arc::new(gateway), "ucshop.pro")
    }

    #[tokio::test]
    async fn test_order_success_renders_link_and_clears() {
        let sessions = SessionStore::new(Duration::from_secs(3600));
        sessions.acquire(42).await.select_package("60");

        let mut gateway = MockGateway::new();
        gateway
            .expect_create_order()
            .withf(|amount, order_id, email| {
                *amount == 70 && order_id == "42_60" && email == "42@ucshop.pro"
            })
            .times(1)
            .returning(|_, _, _| Ok("https://pay.example/o/1?a=1&b=2".into()));

        let reply = handler(&sessions, gateway)
            .execute(&BotEvent::text(42, 42, "12345"))
            .await
            .unwrap()
            .unwrap();

        assert!(reply.html);
        assert!(reply.disable_preview);
        assert!(reply.text.contains("<b>60 UC</b>"));
        assert!(reply.text.contains("<code>12345</code>"));
        assert!(reply.text.contains("href=\"https://pay.example/o/1?a=1&amp;b=2\""));
        assert!(sessions.get(42).await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn test_order_gateway_failure_clears() {
        let sessions = SessionStore::new(Duration::from_secs(3600));
        sessions.acquire(42).await.select_package("325");

        let mut gateway = MockGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_, _, _| Err(GatewayError::MissingRedirect));

        let reply = handler(&sessions, gateway)
            .execute(&BotEvent::text(42, 42, "12345"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reply.text, ORDER_FAILED);
        assert!(sessions.get(42).await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn test_unknown_package_never_calls_gateway() {
        let sessions = SessionStore::new(Duration::from_secs(3600));
        sessions.acquire(42).await.select_package("999");

        let mut gateway = MockGateway::new();
        gateway.expect_create_order().never();

        let reply = handler(&sessions, gateway)
            .execute(&BotEvent::text(42, 42, "anything"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reply.text, ORDER_FAILED);
        assert!(sessions.get(42).await.unwrap().is_idle());
    }

    #[tokio::test]
    async fn test_text_ignored_without_selection() {
        let sessions = SessionStore::new(Duration::from_secs(3600));
        sessions.acquire(42).await.open_menu();

        let mut gateway = MockGateway::new();
        gateway.expect_create_order().never();

        let handler = handler(&sessions, gateway);
        assert!(handler
            .execute(&BotEvent::text(42, 42, "12345"))
            .await
            .unwrap()
            .is_none());
        assert!(handler
            .execute(&BotEvent::text(7, 7, "hello"))
            .await
            .unwrap()
            .is_none());

        assert_eq!(
            sessions.get(42).await.unwrap().state,
            SessionState::ChoosingPackage
        );
    }

    #[tokio::test]
    async fn test_markup_in_game_id_is_escaped() {
        let sessions = SessionStore::new(Duration::from_secs(3600));
        sessions.acquire(42).await.select_package("660");

        let mut gateway = MockGateway::new();
        gateway
            .expect_create_order()
            .returning(|_, _, _| Ok("https://pay.example/o/2".into()));

        let reply = handler(&sessions, gateway)
            .execute(&BotEvent::text(42, 42, "<b>me</b>"))
            .await
            .unwrap()
            .unwrap();

        assert!(reply.text.contains("<code>&lt;b&gt;me&lt;/b&gt;</code>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("12345"), "12345");
    }
}
