//! UC shop bot - Main entry point.

use anyhow::Context;
use gateway_client::GatewayClient;
use secrecy::ExposeSecret;
use session_store::SessionStore;
use std::sync::Arc;
use telegram_client::TelegramClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uc_shop_bot::config::Config;
use uc_shop_bot::{run_listener, AppResult, Dispatcher};
use webhook_server::AppState;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting UC shop bot...");

    // Initialize clients
    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        config.telegram.bot_token.expose_secret().as_str(),
        config.telegram.poll_timeout,
    )
    .context("Failed to create Telegram client")?;

    let gateway = Arc::new(
        GatewayClient::new(
            config.gateway.api_key.expose_secret().as_str(),
            &config.gateway.base_url,
            &config.gateway.shop_id,
            config.gateway.timeout,
        )
        .context("Failed to create gateway client")?
        .with_redirects(&config.gateway.success_url, &config.gateway.fail_url)
        .with_payment_method(config.gateway.payment_method)
        .with_client_ip(&config.gateway.client_ip),
    );

    let sessions = SessionStore::new(config.session.ttl);

    // Health check
    let me = telegram
        .get_me()
        .await
        .context("Telegram API not reachable")?;
    info!(
        "Telegram healthy - bot @{}",
        me.username.as_deref().unwrap_or(&me.first_name)
    );
    info!("Gateway endpoint: {} (shop {})", config.gateway.base_url, gateway.shop_id());

    let dispatcher = Arc::new(Dispatcher::shop(
        sessions,
        gateway,
        &config.bot.shop_name,
        &config.gateway.email_domain,
    ));
    info!("Registered {} command handlers", dispatcher.handler_count());

    // Chat listener in the background, webhook server in the foreground
    let listener = tokio::spawn(run_listener(telegram, dispatcher));

    let state = Arc::new(AppState::new(
        config.gateway.secret_key.expose_secret().as_str(),
    ));
    webhook_server::serve(config.webhook.socket_addr(), state, shutdown_signal()).await?;

    listener.abort();
    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
