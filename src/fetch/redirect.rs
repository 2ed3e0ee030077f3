//! Redirect resolution over repeated in-process dispatches.
//!
//! # States
//! ```text
//! Dispatching ──non-3xx──────────────────────────────▶ Resolved
//!     │
//!     └─3xx─▶ RedirectReceived ──manual / no Location─▶ Resolved
//!                 │        └──error mode / limit / rejected target─▶ NetworkError
//!                 └─follow─▶ Following ─▶ Dispatching
//! ```
//!
//! # Design Decisions
//! - One hop in flight at a time; the next target depends on this hop's headers
//! - `Location` resolves against the most recently visited URL
//! - Method, headers and body are replayed unchanged on every hop
//! - Redirect targets are re-checked against the match predicate; a declined
//!   target is a network error, never a silent real-network call

use axum::http::header::LOCATION;
use axum::http::Method;
use thiserror::Error;
use url::Url;

use super::gate::assert_supported_url;
use super::origin::same_origin;
use super::request::{RedirectMode, Request};
use crate::error::{FetchError, FetchResult};
use crate::headers::{from_multi_value_headers, to_multi_value_headers};
use crate::routing::Matcher;
use crate::transport::{InjectRequest, InjectResult, Transport};

/// Status codes treated as redirects.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

pub fn is_redirect(status: u16) -> bool {
    REDIRECT_STATUSES.contains(&status)
}

/// Why resolution ended in a network error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkErrorReason {
    #[error("redirect encountered with redirect mode 'error'")]
    RedirectRefused,

    #[error("too many redirects ({0} dispatches)")]
    TooManyRedirects(u32),

    #[error("invalid Location header {0:?}")]
    InvalidLocation(String),

    #[error("redirect to non-HTTP(S) URL {0}")]
    NonHttpTarget(Url),

    #[error("redirect target {0} is not served in-process")]
    TargetNotIntercepted(Url),
}

/// Terminal state of a resolution.
#[derive(Debug)]
pub enum RedirectOutcome {
    /// The result to assemble, plus every URL visited (original first).
    Resolved {
        result: InjectResult,
        url_list: Vec<Url>,
    },
    NetworkError(NetworkErrorReason),
}

enum State {
    Dispatching,
    RedirectReceived(InjectResult),
    Following(Url),
}

/// Drives a request through the transport until a terminal state.
pub struct RedirectResolver<'a> {
    transport: &'a dyn Transport,
    matcher: &'a dyn Matcher,
    max_dispatches: u32,
}

impl<'a> RedirectResolver<'a> {
    pub fn new(transport: &'a dyn Transport, matcher: &'a dyn Matcher, max_dispatches: u32) -> Self {
        Self {
            transport,
            matcher,
            max_dispatches,
        }
    }

    /// Resolve `request`, starting at its already-validated `url`.
    ///
    /// Transport failures propagate; redirect-level failures come back as
    /// [`RedirectOutcome::NetworkError`].
    pub async fn resolve(&self, request: &Request, url: Url, method: Method) -> FetchResult<RedirectOutcome> {
        let headers = to_multi_value_headers(request.headers());
        let body = request.body().cloned();
        let mut url_list = vec![url];
        let mut state = State::Dispatching;

        loop {
            state = match state {
                State::Dispatching => {
                    let current = self.current(&url_list);
                    let hop = url_list.len();
                    let result = self
                        .transport
                        .inject(InjectRequest {
                            url: current.clone(),
                            method: method.clone(),
                            headers: headers.clone(),
                            body: body.clone(),
                        })
                        .await
                        .map_err(FetchError::Transport)?;

                    tracing::debug!(
                        hop,
                        url = %current,
                        method = %method,
                        status = result.status_code,
                        "Dispatched in-process"
                    );

                    if !is_redirect(result.status_code) {
                        return Ok(RedirectOutcome::Resolved { result, url_list });
                    }
                    State::RedirectReceived(result)
                }

                State::RedirectReceived(result) => match request.redirect() {
                    RedirectMode::Manual => {
                        return Ok(RedirectOutcome::Resolved { result, url_list });
                    }
                    RedirectMode::Error => {
                        return Ok(RedirectOutcome::NetworkError(NetworkErrorReason::RedirectRefused));
                    }
                    RedirectMode::Follow => {
                        let Some(location) = location(&result)? else {
                            return Ok(RedirectOutcome::Resolved { result, url_list });
                        };

                        let dispatched = url_list.len() as u32;
                        if dispatched >= self.max_dispatches {
                            return Ok(RedirectOutcome::NetworkError(
                                NetworkErrorReason::TooManyRedirects(dispatched),
                            ));
                        }

                        match self.target(self.current(&url_list), &location, request)? {
                            Ok(target) => State::Following(target),
                            Err(reason) => return Ok(RedirectOutcome::NetworkError(reason)),
                        }
                    }
                },

                State::Following(target) => {
                    tracing::debug!(
                        from = %self.current(&url_list),
                        to = %target,
                        same_origin = same_origin(self.current(&url_list), &target),
                        "Following redirect"
                    );
                    url_list.push(target);
                    State::Dispatching
                }
            };
        }
    }

    fn current<'u>(&self, url_list: &'u [Url]) -> &'u Url {
        // The list is seeded with the original URL and only grows.
        &url_list[url_list.len() - 1]
    }

    /// Resolve and vet a redirect target. The outer `Result` carries hard
    /// failures (unsupported scheme); the inner one network-error reasons.
    fn target(
        &self,
        base: &Url,
        location: &str,
        request: &Request,
    ) -> FetchResult<Result<Url, NetworkErrorReason>> {
        let Ok(target) = base.join(location) else {
            return Ok(Err(NetworkErrorReason::InvalidLocation(location.to_string())));
        };

        assert_supported_url(&target)?;
        if !matches!(target.scheme(), "http" | "https") {
            return Ok(Err(NetworkErrorReason::NonHttpTarget(target)));
        }
        if !self.matcher.matches(&target, request) {
            return Ok(Err(NetworkErrorReason::TargetNotIntercepted(target)));
        }

        Ok(Ok(target))
    }
}

/// The first `Location` value of a result, read through the header translator.
fn location(result: &InjectResult) -> FetchResult<Option<String>> {
    let headers = from_multi_value_headers(&result.headers)?;
    Ok(headers.get_all(LOCATION.as_str()).into_iter().next())
}
