//! Real-network fallback for requests the match predicate declines.

use axum::http::Method;
use futures_util::future::BoxFuture;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::error::{FetchError, FetchResult};
use crate::fetch::{RedirectMode, Request, Response};
use crate::headers::Headers;

/// A Fetch-compatible network implementation.
pub trait NetworkFetch: Send + Sync {
    fn fetch(&self, request: Request) -> BoxFuture<'_, FetchResult<Response>>;
}

/// [`NetworkFetch`] over `reqwest`.
///
/// `follow` mode uses reqwest's own redirect handling; `manual` and `error`
/// use a client that never follows, so the 3xx is seen here.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    follow: Client,
    manual: Client,
}

impl ReqwestFetch {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            follow: Client::builder().build()?,
            manual: Client::builder().redirect(Policy::none()).build()?,
        })
    }

    /// Use caller-configured clients. `manual` should not follow redirects.
    pub fn from_clients(follow: Client, manual: Client) -> Self {
        Self { follow, manual }
    }
}

impl NetworkFetch for ReqwestFetch {
    fn fetch(&self, request: Request) -> BoxFuture<'_, FetchResult<Response>> {
        Box::pin(async move {
            let method = Method::from_bytes(request.method().as_bytes())
                .map_err(|_| FetchError::UnsupportedMethod(request.method().to_string()))?;
            let client = match request.redirect() {
                RedirectMode::Follow => &self.follow,
                RedirectMode::Manual | RedirectMode::Error => &self.manual,
            };

            let mut builder = client
                .request(method, request.url())
                .headers(request.headers().as_header_map().clone());
            if let Some(body) = request.body() {
                builder = builder.body(body.clone());
            }

            let res = builder.send().await?;
            if request.redirect() == RedirectMode::Error && res.status().is_redirection() {
                tracing::warn!(url = %res.url(), status = %res.status(), "Redirect refused by network fallback");
                return Ok(Response::network_error());
            }

            let status = res.status();
            let url = res.url().clone();
            let headers = Headers::from(res.headers().clone());
            let body = res.bytes().await?;

            Ok(Response::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                headers,
                (!body.is_empty()).then_some(body),
            )
            .with_url_list(vec![url]))
        })
    }
}
