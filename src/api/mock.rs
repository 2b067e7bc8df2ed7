//! In-memory persistence API and webhook for tests.

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::transport::{HttpRequest, HttpResponse, Method, RemoteError, Transport};
use crate::config::ClientConfig;

pub(crate) const API_BASE: &str = "http://mock.test/api/v1";
pub(crate) const WEBHOOK_BASE: &str = "http://mock.test/webhook";

#[derive(Default)]
struct MockState {
    collections: HashMap<String, Vec<Value>>,
    vision: Option<Value>,
    offline: bool,
    webhook_down: bool,
    /// "METHOD /path" routes answering with `success: false`
    failing: HashSet<String>,
    requests: Vec<HttpRequest>,
}

#[derive(Default)]
pub(crate) struct MockBackend {
    state: Mutex<MockState>,
}

fn reply(status: u16, body: Value) -> HttpResponse {
    HttpResponse { status, body }
}

fn ok(data: Value) -> HttpResponse {
    reply(200, json!({"success": true, "data": data}))
}

fn not_found() -> HttpResponse {
    reply(404, json!({"success": false, "error": "Not found"}))
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn config() -> ClientConfig {
        ClientConfig::new(API_BASE, WEBHOOK_BASE)
    }

    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .collections
            .insert(collection.to_string(), records);
    }

    pub fn set_vision(&self, vision: Value) {
        self.state.lock().unwrap().vision = Some(vision);
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn set_webhook_down(&self, down: bool) {
        self.state.lock().unwrap().webhook_down = down;
    }

    /// Make `method path` answer with an application-level failure
    pub fn fail(&self, method: Method, path: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(format!("{} {}", method.as_str(), path));
    }

    pub fn stored(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn stored_vision(&self) -> Option<Value> {
        self.state.lock().unwrap().vision.clone()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn api_requests(&self) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.starts_with(API_BASE))
            .collect()
    }

    pub fn webhook_calls(&self) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.starts_with(WEBHOOK_BASE))
            .collect()
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state.offline {
            return Err(RemoteError::Transport("connection refused".to_string()));
        }
        if let Some(kind) = request.url.strip_prefix(WEBHOOK_BASE) {
            let status = if state.webhook_down { 503 } else { 200 };
            return Ok(reply(status, json!({"received": kind.trim_start_matches('/')})));
        }

        let path = request
            .url
            .strip_prefix(API_BASE)
            .unwrap_or(&request.url)
            .to_string();
        if state
            .failing
            .contains(&format!("{} {}", request.method.as_str(), path))
        {
            return Ok(reply(500, json!({"success": false, "error": "Simulated failure"})));
        }

        let segments: Vec<String> = path
            .trim_start_matches('/')
            .split('/')
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let body = request.body.clone().unwrap_or(Value::Null);

        let response = match (request.method, segments.as_slice()) {
            (Method::Get, [vision]) if vision == "vision" => {
                ok(state.vision.clone().unwrap_or(Value::Null))
            }
            (Method::Put, [vision]) if vision == "vision" => {
                state.vision = Some(body.clone());
                ok(body)
            }
            (Method::Get, [collection]) => {
                let records = state.collections.get(collection).cloned().unwrap_or_default();
                ok(Value::Array(records))
            }
            (Method::Post, [collection]) => {
                state
                    .collections
                    .entry(collection.clone())
                    .or_default()
                    .push(body.clone());
                ok(body)
            }
            (Method::Put, [collection, id]) => {
                let records = state.collections.entry(collection.clone()).or_default();
                match records.iter_mut().find(|r| id_of(r) == Some(id.as_str())) {
                    Some(existing) => {
                        *existing = body.clone();
                        ok(body)
                    }
                    None => not_found(),
                }
            }
            (Method::Delete, [collection, id]) => {
                let records = state.collections.entry(collection.clone()).or_default();
                let before = records.len();
                records.retain(|r| id_of(r) != Some(id.as_str()));
                if records.len() < before {
                    ok(Value::Null)
                } else {
                    not_found()
                }
            }
            _ => reply(404, json!({"success": false, "error": "Unknown route"})),
        };
        Ok(response)
    }
}
