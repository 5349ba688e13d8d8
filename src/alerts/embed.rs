//! Alert to Discord embed conversion

use serde::{Deserialize, Serialize};

use super::model::AlertRecord;

/// Maximum embeds Discord accepts in one webhook message
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;

/// Maximum characters Discord accepts across all embeds of one message
pub const MAX_MESSAGE_CHARS: usize = 6000;

const MAX_TITLE_CHARS: usize = 256;
const MAX_DESCRIPTION_CHARS: usize = 4096;
const MAX_FIELD_VALUE_CHARS: usize = 1024;

const TITLE_PREFIX: &str = "🚨 ";
const UNKNOWN_ALERT_NAME: &str = "Unknown Alert";
const NO_DESCRIPTION: &str = "No description";

/// A Discord message embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedRecord {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

impl EmbedRecord {
    /// Characters counted against the per-message limit
    pub fn text_len(&self) -> usize {
        self.title.chars().count()
            + self.description.chars().count()
            + self
                .fields
                .iter()
                .map(|f| f.name.chars().count() + f.value.chars().count())
                .sum::<usize>()
    }
}

/// A name/value pair rendered inside an embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: &str, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: truncate_chars(value, MAX_FIELD_VALUE_CHARS),
            inline,
        }
    }
}

/// Severity levels with a dedicated embed color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Map a `severity` label value to a level.
    ///
    /// Values outside the palette are treated as `Info`.
    pub fn from_label(value: &str) -> Self {
        match value {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Severity::Critical => 15158332,
            Severity::Warning => 16776960,
            Severity::Info => 3447003,
        }
    }
}

/// Convert one alert into one embed. Never fails; every missing value has a default.
pub fn transform(alert: &AlertRecord) -> EmbedRecord {
    let severity = alert.severity();
    let name = alert.label("alertname").unwrap_or(UNKNOWN_ALERT_NAME);
    let description = alert
        .annotation("description")
        .or_else(|| alert.annotation("summary"))
        .unwrap_or(NO_DESCRIPTION);

    let mut fields = vec![
        EmbedField::new("Status", &alert.status().to_uppercase(), true),
        EmbedField::new("Severity", &severity.to_uppercase(), true),
    ];
    if let Some(instance) = alert.label("instance") {
        fields.push(EmbedField::new("Instance", instance, false));
    }

    let mut embed = EmbedRecord {
        title: truncate_chars(&format!("{}{}", TITLE_PREFIX, name), MAX_TITLE_CHARS),
        description: String::new(),
        color: Severity::from_label(severity).color(),
        fields,
    };
    // The description absorbs whatever the per-message limit leaves over.
    let budget = MAX_DESCRIPTION_CHARS.min(MAX_MESSAGE_CHARS - embed.text_len());
    embed.description = truncate_chars(description, budget);
    embed
}

/// Cut `s` to at most `max_chars` characters, marking the cut with an ellipsis
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some(_) => {
            let keep: String = s.chars().take(max_chars - 1).collect();
            format!("{}…", keep)
        }
    }
}
