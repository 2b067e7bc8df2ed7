//! Rock Entity
//!
//! A quarterly priority with an owner and completion percentage.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rock {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub due_date: String,
    /// Completion percentage, 0-100
    pub progress: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl Rock {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

impl Entity for Rock {
    const KIND: EntityKind = EntityKind::Rock;

    fn id(&self) -> &str {
        &self.id
    }
}
