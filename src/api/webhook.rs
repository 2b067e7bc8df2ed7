//! CRM Webhook
//!
//! Best-effort push of a just-mutated entity to the CRM. Only the HTTP
//! status is inspected; the body is ignored.

use serde_json::Value;

use super::client::ApiClient;
use super::transport::{HttpRequest, Method, RemoteError};

impl ApiClient {
    /// POST `payload` to `<webhook>/<kind>`.
    ///
    /// Does not touch the connectivity status or the busy counter.
    pub async fn notify(&self, kind: &str, payload: &Value) -> Result<(), RemoteError> {
        let url = format!("{}/{}", self.webhook_base(), kind);
        log::debug!("Webhook sync: POST {}", url);

        let request = HttpRequest {
            method: Method::Post,
            url,
            body: Some(payload.clone()),
        };
        let response = self.transport().send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(RemoteError::Rejected(format!("HTTP {}", response.status)))
        }
    }
}
