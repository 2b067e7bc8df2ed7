//! Remote API Client
//!
//! Bindings to the persistence API and the CRM webhook, organized by domain.
//! Every request goes through a single `Transport` so tests can swap the
//! network out.

mod client;
mod entities;
mod http;
mod transport;
mod webhook;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiClient, ApiResponse, ConnectionStatus};
pub use http::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Method, RemoteError, Transport};
