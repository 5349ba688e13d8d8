//! Alertbridge: Alertmanager to Discord Relay
//!
//! Receives Prometheus Alertmanager webhook notifications, renders each alert
//! as a Discord embed and posts the embeds to a Discord webhook.
//!
//! # Features
//!
//! - **Embed Formatting**: Title, description, severity color and status fields per alert
//! - **Batching**: At most ten embeds per Discord message, sent in order
//! - **Fail-Fast Delivery**: The first rejected message aborts the rest of the batch
//! - **Stateless**: Nothing is stored or retried between requests
//!
//! # Example
//!
//! ```
//! use alertbridge::alerts::{transform, AlertRecord};
//!
//! let alert = AlertRecord::new("firing")
//!     .with_label("alertname", "HighCPU")
//!     .with_label("severity", "critical")
//!     .with_annotation("summary", "CPU high");
//!
//! let embed = transform(&alert);
//! assert_eq!(embed.title, "🚨 HighCPU");
//! assert_eq!(embed.color, 15158332);
//! ```

pub mod alerts;
pub mod api;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use alerts::{transform, AlertBatch, AlertRecord, EmbedRecord, Notifier, NotifierError};
pub use api::{run_server, ServerConfig};
