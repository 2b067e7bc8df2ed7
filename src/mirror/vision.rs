//! V/TO document and CRM sync

use serde_json::{json, Value};

use super::load::decode_vision;
use super::{EntityMirror, MutationOutcome};
use crate::api::ApiClient;
use crate::models::{Severity, VisionDocument};
use crate::notifications::NotificationQueue;

const VISION_ID: &str = "vision";

impl EntityMirror {
    /// Save the whole vision document; the mirror takes the confirmed copy
    pub async fn update_vision(&self, vision: VisionDocument) -> MutationOutcome {
        let body = match serde_json::to_value(&vision) {
            Ok(body) => body,
            Err(e) => return self.vision_failed(e.to_string()),
        };

        let response = self.api.save_vision(body).await;
        if !response.success {
            return self.vision_failed(response.error_message());
        }

        let confirmed = match response.data {
            Some(data @ Value::Object(_)) => decode_vision(data).unwrap_or_else(|e| {
                log::warn!("Ignoring vision echo: {}", e);
                vision
            }),
            _ => vision,
        };
        self.store.write().vision = confirmed;
        log::info!("Saved vision document");

        self.notifications
            .push("V/TO saved successfully!", Severity::Success);
        MutationOutcome::Applied {
            id: VISION_ID.to_string(),
        }
    }

    /// Ask the CRM to pull everything. Only produces a notification.
    pub async fn sync_all(&self) -> bool {
        sync(&self.api, &self.notifications, "all", json!({})).await
    }

    /// Push a just-created entity to the CRM without holding up the caller
    ///
    /// Outside a tokio runtime the sync is skipped; the entity is already
    /// mirrored by then.
    pub(super) fn spawn_sync(&self, kind: &'static str, payload: Value) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("no async runtime, skipping CRM sync of {}", kind);
                return;
            }
        };
        let api = self.api.clone();
        let notifications = self.notifications.clone();
        handle.spawn(async move {
            sync(&api, &notifications, kind, payload).await;
        });
    }

    fn vision_failed(&self, error: String) -> MutationOutcome {
        log::error!("Failed to save vision: {}", error);
        self.notifications
            .push(format!("Failed to save V/TO: {}", error), Severity::Error);
        MutationOutcome::Failed(error)
    }
}

async fn sync(
    api: &ApiClient,
    notifications: &NotificationQueue,
    kind: &str,
    payload: Value,
) -> bool {
    match api.notify(kind, &payload).await {
        Ok(()) => {
            notifications.push("Synced with GoHighLevel successfully", Severity::Success);
            true
        }
        Err(e) => {
            log::warn!("CRM sync of {} failed: {}", kind, e);
            notifications.push("Failed to sync with GoHighLevel", Severity::Error);
            false
        }
    }
}
