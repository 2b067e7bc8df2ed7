//! Notification Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

/// Ephemeral user-facing message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Millisecond timestamp, unique within a queue
    pub id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub severity: Severity,
}
