//! Alertbridge Server
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - DISCORD_WEBHOOK_URL: Discord webhook to forward alerts to (required)
//! - BRIDGE_HOST: Bind address (default: 0.0.0.0)
//! - BRIDGE_PORT: Port number (default: 9094)
//! - BRIDGE_TIMEOUT_SECS: Timeout for each Discord request (default: 10)
//! - RUST_LOG: Log level (default: info)
//!
//! Point an Alertmanager `webhook_configs` receiver at `http://<host>:9094/webhook`.

use alertbridge::api::{run_server, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alertbridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Alertbridge configuration:");
    tracing::info!("  Listen: {}:{}", config.host, config.port);
    tracing::info!("  Discord webhook host: {}", config.webhook_host());
    tracing::info!("  Request timeout: {} seconds", config.timeout_secs);

    println!(
        r#"
 Alertbridge: Alertmanager -> Discord
 Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );

    run_server(config).await
}
