//! Issue Entity
//!
//! An item on the issues list, worked through in the weekly meeting.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Low,
    #[default]
    #[serde(other)]
    Medium,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Issue {
    const KIND: EntityKind = EntityKind::Issue;

    fn id(&self) -> &str {
        &self.id
    }
}
