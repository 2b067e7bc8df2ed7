//! Core Entity Trait
//!
//! Every mirrored entity has a string id that is unique within its kind.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Mutable entity kinds known to the mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Metric,
    Rock,
    Issue,
    Person,
    Todo,
    Meeting,
    /// Lives inside the vision document rather than its own collection
    CoreValue,
}

impl EntityKind {
    /// Kinds that own a top-level collection, in load order
    pub const COLLECTIONS: [EntityKind; 6] = [
        EntityKind::Metric,
        EntityKind::Rock,
        EntityKind::Issue,
        EntityKind::Person,
        EntityKind::Todo,
        EntityKind::Meeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Metric => "metric",
            EntityKind::Rock => "rock",
            EntityKind::Issue => "issue",
            EntityKind::Person => "person",
            EntityKind::Todo => "todo",
            EntityKind::Meeting => "meeting",
            EntityKind::CoreValue => "coreValue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "metric" => Some(EntityKind::Metric),
            "rock" => Some(EntityKind::Rock),
            "issue" => Some(EntityKind::Issue),
            "person" => Some(EntityKind::Person),
            "todo" => Some(EntityKind::Todo),
            "meeting" => Some(EntityKind::Meeting),
            "coreValue" => Some(EntityKind::CoreValue),
            _ => None,
        }
    }

    /// Path segment of the kind's collection endpoint
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Metric => "metrics",
            EntityKind::Rock => "rocks",
            EntityKind::Issue => "issues",
            EntityKind::Person => "people",
            EntityKind::Todo => "todos",
            EntityKind::Meeting => "meetings",
            EntityKind::CoreValue => "coreValues",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core trait for all mirrored entities
pub trait Entity: Sized + Send + Sync + Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}
