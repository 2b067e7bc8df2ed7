//! Create / update / delete

use serde_json::Value;

use super::{decode_remote, EntityMirror, MutationOutcome};
use crate::convert::{is_missing, to_remote};
use crate::models::{EntityKind, Record, Severity};
use crate::store::{store_add, store_find, store_remove, store_update, Stored};
use crate::validate::validate;

/// The confirmed entity: the server's echo when it decodes, else what we sent
fn confirmed_entity<T: Stored>(data: Option<Value>, sent: T) -> T {
    match data {
        Some(Value::Object(echo)) => decode_remote(&echo).unwrap_or_else(|e| {
            log::warn!("Ignoring {} echo: {}", T::KIND, e);
            sent
        }),
        _ => sent,
    }
}

impl EntityMirror {
    /// Validate, persist and append a new entity
    pub async fn create(&self, kind: EntityKind, data: Record) -> MutationOutcome {
        for_kind!(kind, T => self.create_entity::<T>(data).await)
    }

    /// Persist an edit and replace the entity in place. No validation gate.
    pub async fn update(&self, kind: EntityKind, id: &str, data: Record) -> MutationOutcome {
        for_kind!(kind, T => self.update_entity::<T>(id, data).await)
    }

    pub async fn delete(&self, kind: EntityKind, id: &str) -> MutationOutcome {
        for_kind!(kind, T => self.delete_entity::<T>(id).await)
    }

    async fn create_entity<T: Stored>(&self, data: Record) -> MutationOutcome {
        let kind = T::KIND;
        let validation = validate(kind.as_str(), &data);
        if !validation.is_valid() {
            log::debug!(
                "{} not created, missing: {:?}",
                kind,
                validation.errors.keys().collect::<Vec<_>>()
            );
            return MutationOutcome::Invalid(validation.errors);
        }

        let remote = to_remote(kind.as_str(), &data);
        let sent: T = match decode_remote(&remote) {
            Ok(entity) => entity,
            Err(e) => return self.failed("create", kind, e),
        };
        let response = self.api.create(kind, &remote).await;
        if !response.success {
            return self.failed("create", kind, response.error_message());
        }

        let entity = confirmed_entity(response.data, sent);
        let id = entity.id().to_string();
        store_add(&mut self.store.write(), entity.clone());
        log::info!("Created {} {}", kind, id);

        self.notifications
            .push(format!("{} created successfully!", kind), Severity::Success);
        match serde_json::to_value(&entity) {
            Ok(payload) => self.spawn_sync(kind.as_str(), payload),
            Err(e) => log::warn!("Skipping webhook sync for {} {}: {}", kind, id, e),
        }
        MutationOutcome::Applied { id }
    }

    async fn update_entity<T: Stored>(&self, id: &str, mut data: Record) -> MutationOutcome {
        let kind = T::KIND;
        data.insert("id".to_string(), Value::String(id.to_string()));
        if is_missing(data.get("createdAt")) {
            let created_at = {
                let state = self.store.read();
                store_find::<T>(&state, id)
                    .and_then(|existing| serde_json::to_value(existing).ok())
                    .and_then(|value| value.get("createdAt").cloned())
            };
            if let Some(created_at) = created_at.filter(|v| !is_missing(Some(v))) {
                data.insert("createdAt".to_string(), created_at);
            }
        }

        let remote = to_remote(kind.as_str(), &data);
        let sent: T = match decode_remote(&remote) {
            Ok(entity) => entity,
            Err(e) => return self.failed("update", kind, e),
        };
        let response = self.api.update(kind, id, &remote).await;
        if !response.success {
            return self.failed("update", kind, response.error_message());
        }

        let entity = confirmed_entity(response.data, sent);
        if store_update(&mut self.store.write(), entity) {
            log::info!("Updated {} {}", kind, id);
        } else {
            log::warn!("Updated {} {} on the server but it is not mirrored", kind, id);
        }

        self.notifications
            .push(format!("{} updated successfully!", kind), Severity::Success);
        MutationOutcome::Applied { id: id.to_string() }
    }

    async fn delete_entity<T: Stored>(&self, id: &str) -> MutationOutcome {
        let kind = T::KIND;
        let response = self.api.delete(kind, id).await;
        if !response.success {
            return self.failed("delete", kind, response.error_message());
        }

        if store_remove::<T>(&mut self.store.write(), id) {
            log::info!("Deleted {} {}", kind, id);
        } else {
            log::warn!("Deleted {} {} on the server but it is not mirrored", kind, id);
        }

        self.notifications
            .push(format!("{} deleted successfully!", kind), Severity::Success);
        MutationOutcome::Applied { id: id.to_string() }
    }

    fn failed(&self, action: &str, kind: EntityKind, error: String) -> MutationOutcome {
        log::error!("Failed to {} {}: {}", action, kind, error);
        self.notifications.push(
            format!("Failed to {} {}: {}", action, kind, error),
            Severity::Error,
        );
        MutationOutcome::Failed(error)
    }
}
