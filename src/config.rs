//! Client Configuration
//!
//! Endpoints and timings, stored as JSON next to the host application's data.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8787/api/v1";
pub const DEFAULT_WEBHOOK_BASE: &str = "http://localhost:8787/api/ghl/webhook";
pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Persistence API base, e.g. `https://host/api/v1`
    pub api_base: String,
    /// CRM webhook base; the entity kind is appended as a path segment
    pub webhook_base: String,
    pub notification_ttl_secs: u64,
    /// Rolling log directory; logging stays off when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            webhook_base: DEFAULT_WEBHOOK_BASE.to_string(),
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>, webhook_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            webhook_base: webhook_base.into(),
            ..Default::default()
        }
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write config {}: {}", path.display(), e))
    }

    /// Apply `EOS_API_BASE`, `EOS_WEBHOOK_BASE` and `EOS_LOG_DIR` when set
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup("EOS_API_BASE").filter(|v| !v.is_empty()) {
            self.api_base = base;
        }
        if let Some(base) = lookup("EOS_WEBHOOK_BASE").filter(|v| !v.is_empty()) {
            self.webhook_base = base;
        }
        if let Some(dir) = lookup("EOS_LOG_DIR").filter(|v| !v.is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }
}
