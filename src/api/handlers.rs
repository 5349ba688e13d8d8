use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::alerts::{transform, AlertBatch, EmbedRecord, Notifier, NotifierError};

/// Application state shared across handlers
pub struct AppState {
    pub notifier: Notifier,
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check() -> &'static str {
    "OK"
}

// ============================================================================
// Alertmanager Webhook
// ============================================================================

/// Receive an Alertmanager notification and relay it to Discord.
///
/// The body is parsed by hand rather than through the `Json` extractor so that
/// a malformed payload is answered like every other failure.
pub async fn alertmanager_webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let batch: AlertBatch =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    if batch.is_empty() {
        tracing::debug!("Webhook carried no alerts");
        return Ok("No alerts");
    }

    let embeds: Vec<EmbedRecord> = batch.alerts.iter().map(transform).collect();
    let messages = state.notifier.deliver(&embeds).await?;

    tracing::info!(
        alerts = embeds.len(),
        messages,
        "Forwarded alerts to Discord"
    );

    Ok("OK")
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Delivery(#[from] NotifierError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidPayload(msg) => {
                tracing::warn!("Rejected webhook payload: {}", msg)
            }
            ApiError::Delivery(err) => tracing::error!("Alert delivery failed: {}", err),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
