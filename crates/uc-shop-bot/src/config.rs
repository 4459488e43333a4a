//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Payment gateway configuration
    pub gateway: GatewayConfig,

    /// Webhook server configuration
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Session storage configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token from @BotFather
    pub bot_token: SecretString,

    /// Bot API base URL
    #[serde(default = "default_telegram_url")]
    pub api_url: String,

    /// Long-poll timeout for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    /// Gateway API key
    pub api_key: SecretString,

    /// Shop identifier at the gateway
    pub shop_id: String,

    /// Secret the gateway signs webhooks with
    pub secret_key: SecretString,

    /// API base URL
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    /// Redirect after a successful payment
    #[serde(default = "default_redirect_url")]
    pub success_url: String,

    /// Redirect after a failed payment
    #[serde(default = "default_redirect_url")]
    pub fail_url: String,

    /// Payment channel code (`i` in the order request)
    #[serde(default = "default_payment_method")]
    pub payment_method: u32,

    /// Buyer IP reported to the gateway
    #[serde(default = "default_client_ip")]
    pub client_ip: String,

    /// Domain of the synthesized buyer email
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long an unfinished purchase is remembered
    #[serde(default = "default_ttl", with = "humantime_serde")]
    pub ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Shop name shown in the welcome message
    #[serde(default = "default_shop_name")]
    pub shop_name: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl WebhookConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }
}

// Default implementations
impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            shop_name: default_shop_name(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_telegram_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_gateway_url() -> String {
    "https://api.fk.life/v1".into()
}

fn default_redirect_url() -> String {
    "https://t.me/YOUR_BOT_NAME".into()
}

fn default_payment_method() -> u32 {
    44
}

fn default_client_ip() -> String {
    "127.0.0.1".into()
}

fn default_email_domain() -> String {
    "ucshop.pro".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_shop_name() -> String {
    "UC SHOP".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default().separator("__"))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        // Keep strings as strings: a numeric-looking shop id must not be
        // coerced. Numbers and durations are parsed by serde.
        let config = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
