//! Discord webhook delivery

use std::time::Duration;

use serde::Serialize;

use super::embed::{EmbedRecord, MAX_EMBEDS_PER_MESSAGE, MAX_MESSAGE_CHARS};

/// Sends embeds to a single Discord webhook
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: String,
}

#[derive(Serialize)]
struct WebhookMessage<'a> {
    embeds: &'a [EmbedRecord],
}

impl Notifier {
    /// Create a notifier whose requests give up after `timeout`
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::Client(e.to_string()))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    /// Deliver embeds in messages of at most ten, one after another.
    ///
    /// A message is also closed early when the next embed would push it past
    /// Discord's per-message character limit. Stops at the first message Discord does not accept; messages already
    /// accepted stay posted. Returns the number of messages sent.
    pub async fn deliver(&self, embeds: &[EmbedRecord]) -> Result<usize, NotifierError> {
        let mut sent = 0;

        for batch in message_batches(embeds) {
            self.send_batch(batch).await?;
            sent += 1;
        }

        Ok(sent)
    }

    async fn send_batch(&self, batch: &[EmbedRecord]) -> Result<(), NotifierError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookMessage { embeds: batch })
            .send()
            .await
            .map_err(|e| NotifierError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        if !is_accepted(status) {
            tracing::warn!(status, embeds = batch.len(), "Discord rejected webhook message");
            return Err(NotifierError::Rejected { status });
        }

        tracing::debug!(status, embeds = batch.len(), "Webhook message delivered");
        Ok(())
    }
}

/// Split embeds, in order, into slices Discord accepts as one message
fn message_batches(embeds: &[EmbedRecord]) -> Vec<&[EmbedRecord]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut chars = 0;

    for (i, embed) in embeds.iter().enumerate() {
        let len = embed.text_len();
        let full = i - start == MAX_EMBEDS_PER_MESSAGE;
        if i > start && (full || chars + len > MAX_MESSAGE_CHARS) {
            batches.push(&embeds[start..i]);
            start = i;
            chars = 0;
        }
        chars += len;
    }
    if start < embeds.len() {
        batches.push(&embeds[start..]);
    }

    batches
}

/// Discord answers 204 normally and 200 when `?wait=true` is set
fn is_accepted(status: u16) -> bool {
    matches!(status, 200 | 204)
}

/// Notifier errors
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Discord error: {status}")]
    Rejected { status: u16 },

    #[error("Failed to send webhook: {0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
