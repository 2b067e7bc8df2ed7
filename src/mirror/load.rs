//! Initial load
//!
//! One fetch per collection plus the vision document, all in flight at
//! once. Each collection is swapped in as soon as its own fetch resolves.

use serde::Serialize;
use serde_json::Value;

use super::{decode_remote, EntityMirror};
use crate::api::ConnectionStatus;
use crate::convert::from_remote;
use crate::models::{EntityKind, Issue, Meeting, Metric, Person, Rock, Severity, Todo, VisionDocument};
use crate::store::{store_replace_all, Stored};

const VISION: &str = "vision";

/// Which sources loaded and which kept their previous contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, source: &'static str, ok: bool) {
        if ok {
            self.loaded.push(source);
        } else {
            self.failed.push(source);
        }
    }
}

impl EntityMirror {
    /// Fetch every collection and the vision document concurrently
    pub async fn load_all(&self) -> LoadReport {
        log::info!("Loading all collections");
        let (metrics, rocks, issues, people, todos, meetings, vision) = tokio::join!(
            self.load_collection::<Metric>(),
            self.load_collection::<Rock>(),
            self.load_collection::<Issue>(),
            self.load_collection::<Person>(),
            self.load_collection::<Todo>(),
            self.load_collection::<Meeting>(),
            self.load_vision(),
        );

        let mut report = LoadReport::default();
        report.record(EntityKind::Metric.collection(), metrics);
        report.record(EntityKind::Rock.collection(), rocks);
        report.record(EntityKind::Issue.collection(), issues);
        report.record(EntityKind::Person.collection(), people);
        report.record(EntityKind::Todo.collection(), todos);
        report.record(EntityKind::Meeting.collection(), meetings);
        report.record(VISION, vision);

        if report.is_complete() {
            self.api.set_status(ConnectionStatus::Connected);
            log::info!("Loaded {} sources", report.loaded.len());
        } else {
            self.api.set_status(ConnectionStatus::Error);
            log::error!("Load incomplete, failed: {}", report.failed.join(", "));
            self.notifications
                .push("Failed to load data", Severity::Error);
        }
        report
    }

    async fn load_collection<T: Stored>(&self) -> bool {
        let kind = T::KIND;
        let response = self.api.list(kind).await;
        if !response.success {
            log::warn!("Loading {} failed: {}", kind.collection(), response.error_message());
            return false;
        }

        let records = match response.data {
            Some(Value::Array(records)) => records,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                log::warn!("Loading {}: expected a list, got {}", kind.collection(), other);
                return false;
            }
        };

        let mut entities: Vec<T> = Vec::with_capacity(records.len());
        for record in records {
            let decoded = match record {
                Value::Object(remote) => decode_remote(&remote),
                other => Err(format!("Invalid {} record: {}", kind, other)),
            };
            match decoded {
                Ok(entity) => entities.push(entity),
                Err(e) => log::warn!("Skipping record: {}", e),
            }
        }

        log::debug!("Loaded {} {}", entities.len(), kind.collection());
        store_replace_all(&mut self.store.write(), entities);
        true
    }

    async fn load_vision(&self) -> bool {
        let response = self.api.fetch_vision().await;
        if !response.success {
            log::warn!("Loading vision failed: {}", response.error_message());
            return false;
        }

        match decode_vision(response.data.unwrap_or(Value::Null)) {
            Ok(vision) => {
                self.store.write().vision = vision;
                true
            }
            Err(e) => {
                log::warn!("Loading vision failed: {}", e);
                false
            }
        }
    }
}

/// Null means "never saved" and yields the empty document
pub(super) fn decode_vision(data: Value) -> Result<VisionDocument, String> {
    let mut document = match data {
        Value::Null => return Ok(VisionDocument::default()),
        Value::Object(document) => document,
        other => return Err(format!("expected an object, got {}", other)),
    };

    if let Some(Value::Array(values)) = document.get_mut("coreValues") {
        for value in values.iter_mut() {
            if let Value::Object(remote) = value {
                *remote = from_remote(EntityKind::CoreValue.as_str(), remote);
            }
        }
    }
    serde_json::from_value(Value::Object(document)).map_err(|e| e.to_string())
}
