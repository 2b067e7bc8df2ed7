//! Entity Mirror
//!
//! In-memory copy of the server's collections. Every mutation goes to the
//! server first and the mirror only changes once the server has confirmed.
//! Read access is by snapshot; nothing outside this module writes the store.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

use crate::api::{ApiClient, ConnectionStatus, Transport};
use crate::config::ClientConfig;
use crate::convert::from_remote;
use crate::models::{
    Issue, Meeting, Metric, Notification, Person, Record, Rock, RosterEntry, Todo, VisionDocument,
};
use crate::notifications::NotificationQueue;
use crate::stats::{compute_stats, DashboardStats};
use crate::store::{AppState, AppStore, Stored};
use crate::validate::FieldErrors;

/// Run `$body` with `$t` bound to the entity type of `$kind`
macro_rules! for_kind {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            $crate::models::EntityKind::Metric => {
                type $t = $crate::models::Metric;
                $body
            }
            $crate::models::EntityKind::Rock => {
                type $t = $crate::models::Rock;
                $body
            }
            $crate::models::EntityKind::Issue => {
                type $t = $crate::models::Issue;
                $body
            }
            $crate::models::EntityKind::Person => {
                type $t = $crate::models::Person;
                $body
            }
            $crate::models::EntityKind::Todo => {
                type $t = $crate::models::Todo;
                $body
            }
            $crate::models::EntityKind::Meeting => {
                type $t = $crate::models::Meeting;
                $body
            }
            $crate::models::EntityKind::CoreValue => {
                type $t = $crate::models::CoreValue;
                $body
            }
        }
    };
}

mod load;
mod mutations;
mod vision;


pub use load::LoadReport;

/// Result of a create/update/delete as seen by the form that triggered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Server confirmed and the mirror was updated
    Applied { id: String },
    /// Required fields missing; nothing was sent
    Invalid(FieldErrors),
    /// Server or transport refused; the mirror is unchanged
    Failed(String),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// Whether the editing form should be closed and cleared
    pub fn should_close_form(&self) -> bool {
        self.is_applied()
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            MutationOutcome::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Cheap to clone; clones share state, client and notifications
#[derive(Clone)]
pub struct EntityMirror {
    api: ApiClient,
    store: AppStore,
    notifications: NotificationQueue,
}

impl EntityMirror {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::with_client(config, ApiClient::new(config, transport))
    }

    /// Mirror talking to the configured server over HTTP
    pub fn connect(config: &ClientConfig) -> Self {
        Self::with_client(config, ApiClient::with_reqwest(config))
    }

    fn with_client(config: &ClientConfig, api: ApiClient) -> Self {
        log::info!(
            "Entity mirror for {} (webhook {})",
            config.api_base,
            config.webhook_base
        );
        Self {
            api,
            store: AppStore::new(),
            notifications: NotificationQueue::new(config.notification_ttl()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn status(&self) -> ConnectionStatus {
        self.api.status()
    }

    pub fn is_busy(&self) -> bool {
        self.api.is_busy()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn active_notifications(&self) -> Vec<Notification> {
        self.notifications.list()
    }

    pub fn snapshot(&self) -> AppState {
        self.store.snapshot()
    }

    /// Current contents of one collection
    pub fn items<T: Stored>(&self) -> Vec<T> {
        T::items(&self.store.read()).clone()
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.items()
    }

    pub fn rocks(&self) -> Vec<Rock> {
        self.items()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.items()
    }

    pub fn people(&self) -> Vec<Person> {
        self.items()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.items()
    }

    pub fn meetings(&self) -> Vec<Meeting> {
        self.items()
    }

    pub fn vision(&self) -> VisionDocument {
        self.store.read().vision.clone()
    }

    /// Owner/assignee choices, always derived from the current people
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.store.read().roster()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> DashboardStats {
        compute_stats(&self.store.read(), now)
    }
}

/// Normalize a remote record and decode it into `T`
fn decode_remote<T: Stored>(remote: &Record) -> Result<T, String> {
    let local = from_remote(T::KIND.as_str(), remote);
    serde_json::from_value(Value::Object(local))
        .map_err(|e| format!("Invalid {} record: {}", T::KIND, e))
}
