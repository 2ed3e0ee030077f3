//! Collaborators the dispatcher drives.
//!
//! # Data Flow
//! ```text
//! Dispatcher
//!     → Transport::inject (one hop, in-process)  → InjectResult
//!     → NetworkFetch::fetch (match predicate declined) → Response
//! ```
//!
//! # Design Decisions
//! - Both seams are object-safe traits returning boxed futures so a
//!   Dispatcher can hold them behind `Arc<dyn ..>`
//! - Transport errors are opaque `BoxError`s and propagate unchanged

pub mod network;
pub mod router;

use axum::body::Bytes;
use axum::http::Method;
use axum::BoxError;
use futures_util::future::BoxFuture;
use url::Url;

use crate::headers::MultiValueHeaders;

pub use network::{NetworkFetch, ReqwestFetch};
pub use router::RouterTransport;

/// One in-process dispatch.
#[derive(Debug, Clone)]
pub struct InjectRequest {
    pub url: Url,
    pub method: Method,
    pub headers: MultiValueHeaders,
    pub body: Option<Bytes>,
}

/// The application's answer to one [`InjectRequest`].
#[derive(Debug, Clone)]
pub struct InjectResult {
    pub status_code: u16,
    pub status_message: String,
    pub headers: MultiValueHeaders,
    /// Raw bytes, before any content decoding.
    pub raw_payload: Bytes,
}

/// Dispatches requests into an application without a socket.
pub trait Transport: Send + Sync {
    fn inject(&self, request: InjectRequest) -> BoxFuture<'_, Result<InjectResult, BoxError>>;
}
