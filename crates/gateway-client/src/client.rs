//! Payment gateway HTTP client.

use crate::error::GatewayError;
use crate::types::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_PAYMENT_METHOD: u32 = 44;
const DEFAULT_CLIENT_IP: &str = "127.0.0.1";
const DEFAULT_REDIRECT_URL: &str = "https://t.me/YOUR_BOT_NAME";

/// Something that can turn an order into a hosted payment page.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order and return the URL the buyer pays at.
    async fn create_order(
        &self,
        amount: u32,
        order_id: &str,
        email: &str,
    ) -> Result<String, GatewayError>;
}

/// Payment gateway client.
///
/// The API key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    shop_id: String,
    payment_method: u32,
    client_ip: String,
    success_url: String,
    fail_url: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        shop_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            shop_id: shop_id.into(),
            payment_method: DEFAULT_PAYMENT_METHOD,
            client_ip: DEFAULT_CLIENT_IP.into(),
            success_url: DEFAULT_REDIRECT_URL.into(),
            fail_url: DEFAULT_REDIRECT_URL.into(),
        })
    }

    /// Where the buyer lands after paying or giving up.
    pub fn with_redirects(
        mut self,
        success_url: impl Into<String>,
        fail_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.fail_url = fail_url.into();
        self
    }

    pub fn with_payment_method(mut self, payment_method: u32) -> Self {
        self.payment_method = payment_method;
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = client_ip.into();
        self
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    fn order_request(&self, amount: u32, order_id: &str, email: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            shop_id: self.shop_id.clone(),
            amount,
            currency: CURRENCY.into(),
            order_id: order_id.into(),
            email: email.into(),
            ip: self.client_ip.clone(),
            i: self.payment_method,
            success_url: self.success_url.clone(),
            fail_url: self.fail_url.clone(),
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Gateway rejected API key");
                GatewayError::Unauthorized
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                GatewayError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    #[instrument(skip(self, email), fields(shop_id = %self.shop_id))]
    async fn create_order(
        &self,
        amount: u32,
        order_id: &str,
        email: &str,
    ) -> Result<String, GatewayError> {
        let request = self.order_request(amount, order_id, email);

        let response = self
            .client
            .post(format!("{}/orders/create", self.base_url))
            .header("api-key", self.api_key.expose_secret().as_str())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        let body = response.text().await?;
        debug!("Response body: {}", body.chars().take(200).collect::<String>());
        let order: CreateOrderResponse = serde_json::from_str(&body)?;

        order
            .location
            .filter(|url| !url.is_empty())
            .ok_or(GatewayError::MissingRedirect)
    }
}
