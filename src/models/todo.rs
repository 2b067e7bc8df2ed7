//! Todo Entity

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

/// A seven-day action item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub task: String,
    pub owner: String,
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Todo {
    const KIND: EntityKind = EntityKind::Todo;

    fn id(&self) -> &str {
        &self.id
    }
}
