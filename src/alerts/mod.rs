//! Alert formatting and delivery
//!
//! Converts Alertmanager alerts into Discord embeds and posts them to a
//! Discord webhook in messages of at most ten embeds.

pub mod embed;
pub mod model;
pub mod notifier;

pub use embed::{
    transform, EmbedField, EmbedRecord, Severity, MAX_EMBEDS_PER_MESSAGE, MAX_MESSAGE_CHARS,
};
pub use model::{AlertBatch, AlertRecord};
pub use notifier::{Notifier, NotifierError};
