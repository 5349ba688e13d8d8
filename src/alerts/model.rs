//! Alertmanager webhook payload types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status reported when an alert carries none
pub const DEFAULT_STATUS: &str = "unknown";

/// Severity assumed when the `severity` label is missing
pub const DEFAULT_SEVERITY: &str = "info";

type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Top-level body posted by Alertmanager to a webhook receiver.
///
/// Only `alerts` is read; the grouping metadata Alertmanager sends alongside
/// it (`groupKey`, `receiver`, `commonLabels`, ...) is ignored. The body must
/// be a JSON object, and a missing or `null` `alerts` means no alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct AlertBatch {
    pub alerts: Vec<AlertRecord>,
}

#[derive(Deserialize)]
struct RawAlertBatch {
    #[serde(default)]
    alerts: Option<Vec<AlertRecord>>,
}

impl TryFrom<JsonObject> for AlertBatch {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let raw: RawAlertBatch = serde_json::from_value(object.into())?;
        Ok(Self {
            alerts: raw.alerts.unwrap_or_default(),
        })
    }
}

impl AlertBatch {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// A single alert as sent by Alertmanager. Must be a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct AlertRecord {
    /// `firing` or `resolved` in practice
    pub status: Option<String>,
    pub labels: HashMap<String, String>,
    pub annotations: HashMap<String, String>,
}

#[derive(Deserialize)]
struct RawAlertRecord {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    annotations: HashMap<String, String>,
}

impl TryFrom<JsonObject> for AlertRecord {
    type Error = serde_json::Error;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        let raw: RawAlertRecord = serde_json::from_value(object.into())?;
        Ok(Self {
            status: raw.status,
            labels: raw.labels,
            annotations: raw.annotations,
        })
    }
}

impl AlertRecord {
    /// Create an alert with the given status and no labels or annotations
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }

    pub fn severity(&self) -> &str {
        self.label("severity").unwrap_or(DEFAULT_SEVERITY)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}
