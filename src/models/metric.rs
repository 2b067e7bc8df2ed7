//! Metric Entity
//!
//! A scorecard line: a weekly number tracked against a goal.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

/// Whether a metric is meeting its goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MetricStatus {
    OnTrack,
    Behind,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Scorecard metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub goal: String,
    /// Latest measured value
    pub current: String,
    pub status: MetricStatus,
    /// Owner name (roster reference)
    pub owner: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Metric {
    const KIND: EntityKind = EntityKind::Metric;

    fn id(&self) -> &str {
        &self.id
    }
}
