use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::{alertmanager_webhook, health_check, AppState};
use crate::alerts::Notifier;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Discord webhook every alert is forwarded to
    pub webhook_url: String,
    /// Timeout for each outbound webhook request
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 9094;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Create a config with default bind address and timeout
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: Self::DEFAULT_PORT,
            webhook_url: webhook_url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a config from environment variables
    /// BRIDGE_HOST=0.0.0.0
    /// BRIDGE_PORT=9094
    /// DISCORD_WEBHOOK_URL=https://discord.com/api/webhooks/<id>/<token>
    /// BRIDGE_TIMEOUT_SECS=10
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("DISCORD_WEBHOOK_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_WEBHOOK_URL"))?;
        reqwest::Url::parse(&webhook_url)
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        let mut config = Self::new(webhook_url);

        if let Some(host) = lookup("BRIDGE_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("BRIDGE_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "BRIDGE_PORT",
                value: port,
            })?;
        }
        if let Some(secs) = lookup("BRIDGE_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|_| ConfigError::Invalid {
                key: "BRIDGE_TIMEOUT_SECS",
                value: secs,
            })?;
        }

        Ok(config)
    }

    /// Webhook host, safe to log; the URL path carries the webhook token
    pub fn webhook_host(&self) -> String {
        reqwest::Url::parse(&self.webhook_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "<invalid>".to_string())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/webhook", post(alertmanager_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = Notifier::new(
        config.webhook_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;
    let state = Arc::new(AppState { notifier });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting bridge on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");

    tracing::info!("Shutdown signal received");
}
