//! API Client
//!
//! Wraps a transport with the `{success, data, error}` envelope, the
//! connectivity status and the in-flight counter behind the busy indicator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::http::ReqwestTransport;
use super::transport::{HttpRequest, Method, RemoteError, Transport};
use crate::config::ClientConfig;

/// Connectivity as last observed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// No call has completed yet
    #[default]
    Disconnected,
    /// Last call succeeded
    Connected,
    /// Last call failed at transport level
    Error,
}

/// Response envelope shared by every persistence endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn error_message(&self) -> String {
        self.error.clone().unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[derive(Default)]
struct ClientShared {
    status: Mutex<ConnectionStatus>,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter when the call finishes, however it ends
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Cheap to clone; clones share status and counters
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    api_base: Arc<str>,
    webhook_base: Arc<str>,
    shared: Arc<ClientShared>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_base: Arc::from(config.api_base.trim_end_matches('/')),
            webhook_base: Arc::from(config.webhook_base.trim_end_matches('/')),
            shared: Arc::new(ClientShared::default()),
        }
    }

    /// Client over real HTTP
    pub fn with_reqwest(config: &ClientConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn status(&self) -> ConnectionStatus {
        *self
            .shared
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_status(&self, status: ConnectionStatus) {
        *self
            .shared
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = status;
    }

    /// Number of persistence calls currently outstanding
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn webhook_base(&self) -> &str {
        &self.webhook_base
    }

    /// Call a persistence endpoint (path relative to the API base).
    ///
    /// Never fails: transport errors and rejected requests come back as an
    /// envelope with `success == false`.
    pub async fn call(&self, endpoint: &str, method: Method, body: Option<Value>) -> ApiResponse {
        let _busy = BusyGuard::enter(&self.shared.in_flight);
        let url = format!("{}{}", self.api_base, endpoint);
        log::debug!("API call: {} {}", method.as_str(), url);

        let request = HttpRequest {
            method,
            url,
            body,
        };
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("API {} {} failed: {}", method.as_str(), endpoint, e);
                self.set_status(ConnectionStatus::Error);
                return ApiResponse::failure(e.to_string());
            }
        };

        let status = response.status;
        match serde_json::from_value::<ApiResponse>(response.body) {
            Ok(envelope) if envelope.success => {
                self.set_status(ConnectionStatus::Connected);
                envelope
            }
            Ok(envelope) => {
                let message = envelope
                    .error
                    .unwrap_or_else(|| format!("Request failed with HTTP {}", status));
                log::warn!("API {} {} rejected: {}", method.as_str(), endpoint, message);
                ApiResponse::failure(message)
            }
            Err(e) => {
                let error = RemoteError::Decode(e.to_string());
                log::warn!("API {} {} returned garbage: {}", method.as_str(), endpoint, error);
                self.set_status(ConnectionStatus::Error);
                ApiResponse::failure(error.to_string())
            }
        }
    }
}
