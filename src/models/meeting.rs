//! Meeting Entity
//!
//! A scheduled Level 10 meeting.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    /// Start time as entered (RFC 3339 or `YYYY-MM-DDTHH:MM` local)
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilitator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Meeting {
    const KIND: EntityKind = EntityKind::Meeting;

    fn id(&self) -> &str {
        &self.id
    }
}
