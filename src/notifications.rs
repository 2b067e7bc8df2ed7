//! Notification Queue
//!
//! Short-lived user-facing messages. Each notification removes itself after
//! the queue's delay on its own timer, independent of the others.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::models::{Notification, Severity};

#[derive(Default)]
struct QueueState {
    active: Vec<Notification>,
    last_id: i64,
}

/// Cheap to clone; clones share the same queue
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Mutex<QueueState>>,
    ttl: Duration,
}

fn lock(inner: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueState::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Add a notification and schedule its removal. Returns its id.
    ///
    /// Outside a tokio runtime the notification is kept until the queue is
    /// dropped.
    pub fn push(&self, message: impl Into<String>, severity: Severity) -> i64 {
        let message = message.into();
        match severity {
            Severity::Error => log::warn!("notify[error]: {}", message),
            _ => log::info!("notify[{:?}]: {}", severity, message),
        }

        let id = {
            let mut state = lock(&self.inner);
            let id = Utc::now().timestamp_millis().max(state.last_id + 1);
            state.last_id = id;
            state.active.push(Notification {
                id,
                message,
                severity,
            });
            id
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                let ttl = self.ttl;
                handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    lock(&inner).active.retain(|n| n.id != id);
                });
            }
            Err(_) => log::warn!("no async runtime, notification {} will not expire", id),
        }
        id
    }

    /// Active notifications in insertion order
    pub fn list(&self) -> Vec<Notification> {
        lock(&self.inner).active.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
