//! Entity Endpoints
//!
//! `/<collection>` for list/create, `/<collection>/<id>` for update/delete,
//! and the `/vision` singleton.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use super::client::{ApiClient, ApiResponse};
use super::transport::Method;
use crate::models::{EntityKind, Record};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn collection_path(kind: EntityKind) -> String {
    format!("/{}", kind.collection())
}

fn item_path(kind: EntityKind, id: &str) -> String {
    format!(
        "/{}/{}",
        kind.collection(),
        utf8_percent_encode(id, PATH_SEGMENT)
    )
}

impl ApiClient {
    pub async fn list(&self, kind: EntityKind) -> ApiResponse {
        self.call(&collection_path(kind), Method::Get, None).await
    }

    pub async fn create(&self, kind: EntityKind, record: &Record) -> ApiResponse {
        let body = Value::Object(record.clone());
        self.call(&collection_path(kind), Method::Post, Some(body)).await
    }

    pub async fn update(&self, kind: EntityKind, id: &str, record: &Record) -> ApiResponse {
        let body = Value::Object(record.clone());
        self.call(&item_path(kind, id), Method::Put, Some(body)).await
    }

    pub async fn delete(&self, kind: EntityKind, id: &str) -> ApiResponse {
        self.call(&item_path(kind, id), Method::Delete, None).await
    }

    pub async fn fetch_vision(&self) -> ApiResponse {
        self.call("/vision", Method::Get, None).await
    }

    pub async fn save_vision(&self, vision: Value) -> ApiResponse {
        self.call("/vision", Method::Put, Some(vision)).await
    }
}
