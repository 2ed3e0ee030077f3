//! In-process transport over an axum `Router`.
//!
//! # Responsibilities
//! - Turn an `InjectRequest` into an `http::Request` the router understands
//! - Fill in `host`, `user-agent` and `content-length` the way a client would
//! - Drive the router with `oneshot`, no socket involved
//! - Buffer the response body into an `InjectResult`

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_LENGTH, HOST, USER_AGENT};
use axum::http::response::Parts;
use axum::http::Request as HttpRequest;
use axum::{BoxError, Router};
use futures_util::future::BoxFuture;
use hyper::ext::ReasonPhrase;
use tower::ServiceExt;
use url::Url;

use super::{InjectRequest, InjectResult, Transport};
use crate::config::FetchConfig;
use crate::headers::{from_multi_value_headers, to_multi_value_headers, Headers};

/// Serves injected requests with an axum application.
#[derive(Clone)]
pub struct RouterTransport {
    router: Router,
    user_agent: String,
    max_body_bytes: usize,
}

impl RouterTransport {
    pub fn new(router: Router) -> Self {
        Self::with_config(router, &FetchConfig::default())
    }

    pub fn with_config(router: Router, config: &FetchConfig) -> Self {
        Self {
            router,
            user_agent: config.user_agent.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    fn build_request(&self, request: InjectRequest) -> Result<HttpRequest<Body>, BoxError> {
        let mut headers = from_multi_value_headers(&request.headers)?;

        if !headers.has(HOST.as_str()) {
            if let Some(authority) = authority(&request.url) {
                headers.set(HOST.as_str(), &authority)?;
            }
        }
        if !headers.has(USER_AGENT.as_str()) {
            headers.set(USER_AGENT.as_str(), &self.user_agent)?;
        }

        let body = match request.body {
            Some(bytes) => {
                if !headers.has(CONTENT_LENGTH.as_str()) {
                    headers.set(CONTENT_LENGTH.as_str(), &bytes.len().to_string())?;
                }
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let mut url = request.url;
        url.set_fragment(None);

        let mut http_request = HttpRequest::builder()
            .method(request.method)
            .uri(url.as_str())
            .body(body)?;
        *http_request.headers_mut() = headers.into_header_map();

        Ok(http_request)
    }
}

impl std::fmt::Debug for RouterTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterTransport")
            .field("user_agent", &self.user_agent)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}

impl Transport for RouterTransport {
    fn inject(&self, request: InjectRequest) -> BoxFuture<'_, Result<InjectResult, BoxError>> {
        Box::pin(async move {
            let http_request = self.build_request(request)?;
            tracing::trace!(
                method = %http_request.method(),
                uri = %http_request.uri(),
                "Injecting request"
            );

            let response = self.router.clone().oneshot(http_request).await?;
            let (parts, body) = response.into_parts();
            let raw_payload = to_bytes(body, self.max_body_bytes).await?;

            Ok(InjectResult {
                status_code: parts.status.as_u16(),
                status_message: reason_phrase(&parts),
                headers: to_multi_value_headers(&Headers::from(parts.headers)),
                raw_payload,
            })
        })
    }
}

/// The handler's own reason phrase when it set one, else the canonical one.
fn reason_phrase(parts: &Parts) -> String {
    match parts.extensions.get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => parts.status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// `host[:port]`, with the port omitted when it is the scheme default.
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
