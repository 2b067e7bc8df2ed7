//! Client-side sync layer for an EOS business-operations dashboard.
//!
//! Mirrors the scorecard, rocks, issues, people, to-dos, meetings and the
//! V/TO from a remote persistence API, keeps the mirror consistent with
//! confirmed server responses and derives the dashboard aggregates.

pub mod api;
pub mod config;
pub mod convert;
pub mod logging;
pub mod mirror;
pub mod models;
pub mod notifications;
pub mod stats;
pub mod store;
pub mod validate;

pub use api::{ApiClient, ApiResponse, ConnectionStatus, RemoteError, ReqwestTransport, Transport};
pub use config::ClientConfig;
pub use logging::init_logging;
pub use mirror::{EntityMirror, LoadReport, MutationOutcome};
pub use models::{EntityKind, Record};
pub use notifications::NotificationQueue;
pub use stats::{compute_stats, DashboardStats};
pub use store::AppState;
pub use validate::{validate, FieldErrors, Validation};
