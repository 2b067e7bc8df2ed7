//! Dashboard Models
//!
//! Local-format entities mirrored from the persistence API.

mod entity;
mod issue;
mod meeting;
mod metric;
mod notification;
mod person;
mod rock;
mod todo;
mod vision;

pub use entity::{Entity, EntityKind};
pub use issue::{Issue, Priority};
pub use meeting::Meeting;
pub use metric::{Metric, MetricStatus};
pub use notification::{Notification, Severity};
pub use person::{Person, RosterEntry, Seat};
pub use rock::Rock;
pub use todo::Todo;
pub use vision::{CoreFocus, CoreValue, VisionDocument};

/// Untyped record as exchanged with forms and the remote API
pub type Record = serde_json::Map<String, serde_json::Value>;
