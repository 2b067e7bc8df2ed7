//! Mirror State Store
//!
//! Holds the mirrored collections. Only the entity mirror writes to it,
//! through the helpers below, and only after the server has confirmed.

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{
    CoreValue, Entity, Issue, Meeting, Metric, Person, Rock, RosterEntry, Todo, VisionDocument,
};

/// Everything mirrored from the server
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub metrics: Vec<Metric>,
    pub rocks: Vec<Rock>,
    pub issues: Vec<Issue>,
    pub people: Vec<Person>,
    pub todos: Vec<Todo>,
    pub meetings: Vec<Meeting>,
    pub vision: VisionDocument,
}

impl AppState {
    /// Owner/assignee choices, projected from `people` on every call
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.people.iter().map(RosterEntry::from).collect()
    }
}

/// Entities with a home collection inside `AppState`
pub trait Stored: Entity {
    fn items(state: &AppState) -> &Vec<Self>;
    fn items_mut(state: &mut AppState) -> &mut Vec<Self>;
}

impl Stored for Metric {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.metrics
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.metrics
    }
}

impl Stored for Rock {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.rocks
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.rocks
    }
}

impl Stored for Issue {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.issues
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.issues
    }
}

impl Stored for Person {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.people
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.people
    }
}

impl Stored for Todo {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.todos
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.todos
    }
}

impl Stored for Meeting {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.meetings
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.meetings
    }
}

impl Stored for CoreValue {
    fn items(state: &AppState) -> &Vec<Self> {
        &state.vision.core_values
    }
    fn items_mut(state: &mut AppState) -> &mut Vec<Self> {
        &mut state.vision.core_values
    }
}

/// Shared handle to the mirror state. Locks are never held across an await.
#[derive(Clone, Default)]
pub(crate) struct AppStore {
    inner: Arc<RwLock<AppState>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, AppState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> AppState {
        self.read().clone()
    }
}

// ========================
// Store Helper Functions
// ========================

/// Append an entity, keeping insertion order. An entity whose id is
/// already present replaces it in place, so ids stay unique per kind.
pub(crate) fn store_add<T: Stored>(state: &mut AppState, entity: T) {
    let items = T::items_mut(state);
    match items.iter_mut().find(|item| item.id() == entity.id()) {
        Some(existing) => *existing = entity,
        None => items.push(entity),
    }
}

/// Replace the entity with the same id in place. Returns false if absent.
pub(crate) fn store_update<T: Stored>(state: &mut AppState, updated: T) -> bool {
    match T::items_mut(state)
        .iter_mut()
        .find(|item| item.id() == updated.id())
    {
        Some(item) => {
            *item = updated;
            true
        }
        None => false,
    }
}

/// Remove the entity with `id`. Returns false if absent.
pub(crate) fn store_remove<T: Stored>(state: &mut AppState, id: &str) -> bool {
    let items = T::items_mut(state);
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() < before
}

/// Swap a whole collection in one step
pub(crate) fn store_replace_all<T: Stored>(state: &mut AppState, entities: Vec<T>) {
    *T::items_mut(state) = entities;
}

pub(crate) fn store_find<'a, T: Stored>(state: &'a AppState, id: &str) -> Option<&'a T> {
    T::items(state).iter().find(|item| item.id() == id)
}
