//! The `fetch` entry point.
//!
//! # Responsibilities
//! - Fail fast on unsupported schemes and methods
//! - Answer `data:` URLs locally
//! - Hand declined requests to the network fallback untouched
//! - Resolve intercepted requests in-process and assemble the response
//!
//! # Data Flow
//! ```text
//! Request
//!     → gate.rs (parse URL, check scheme + method)
//!     → data: URL?        → data_uri.rs → Response
//!     → matcher declines? → NetworkFetch → Response
//!     → redirect.rs (dispatch / follow)
//!         → NetworkError → Response::network_error()
//!         → Resolved     → headers::translate + decoding → Response
//! ```
//!
//! # Design Decisions
//! - Collaborators are injected once at build time and shared behind `Arc`
//! - The dispatcher is cheap to clone and safe to share across tasks
//! - Decoding is skipped for `HEAD`, `204` and `304`

use std::sync::Arc;

use axum::http::header::CONTENT_LENGTH;
use axum::http::Method;
use axum::Router;
use futures_util::future::BoxFuture;
use url::Url;

use super::data_uri;
use super::gate::{assert_supported_method, assert_supported_url, parse_url};
use super::redirect::{RedirectOutcome, RedirectResolver};
use super::request::Request;
use super::response::{Response, ResponseType};
use crate::config::validation::validate_config;
use crate::config::{ConfigError, FetchConfig};
use crate::decoding::decode;
use crate::error::FetchResult;
use crate::headers::from_multi_value_headers;
use crate::routing::{self, Matcher};
use crate::transport::{InjectResult, NetworkFetch, ReqwestFetch, RouterTransport, Transport};

/// Serves Fetch-style requests with an in-process application.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    matcher: Arc<dyn Matcher>,
    network: Arc<dyn NetworkFetch>,
    config: Arc<FetchConfig>,
}

impl Dispatcher {
    /// Build a dispatcher around any [`Transport`].
    pub fn builder(transport: impl Transport + 'static) -> DispatcherBuilder {
        DispatcherBuilder::new(TransportSource::Ready(Arc::new(transport)))
    }

    /// Build a dispatcher serving an axum application.
    ///
    /// The router transport is created at [`DispatcherBuilder::build`] so it
    /// picks up the final configuration.
    pub fn router(router: Router) -> DispatcherBuilder {
        DispatcherBuilder::new(TransportSource::Router(router))
    }

    /// A dispatcher that intercepts everything and serves it with `router`.
    pub fn for_router(router: Router) -> FetchResult<Self> {
        Self::router(router).build()
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Perform a fetch.
    ///
    /// Malformed input fails with an error before any dispatch. Redirect
    /// failures come back as [`Response::network_error`].
    pub async fn fetch(&self, request: Request) -> FetchResult<Response> {
        let url = parse_url(request.url())?;
        assert_supported_url(&url)?;
        let method = assert_supported_method(request.method())?;

        if url.scheme() == "data" {
            return data_uri::respond(&url);
        }

        if !self.matcher.matches(&url, &request) {
            tracing::info!(url = %url, method = %method, "Not intercepted, using network fetch");
            return self.network.fetch(request).await;
        }

        let resolver = RedirectResolver::new(
            self.transport.as_ref(),
            self.matcher.as_ref(),
            self.config.max_dispatches,
        );

        match resolver.resolve(&request, url, method.clone()).await? {
            RedirectOutcome::NetworkError(reason) => {
                tracing::warn!(url = request.url(), %reason, "Fetch failed");
                Ok(Response::network_error())
            }
            RedirectOutcome::Resolved { result, url_list } => assemble(&method, result, url_list),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A dispatcher can stand in wherever a network fetch is expected.
impl NetworkFetch for Dispatcher {
    fn fetch(&self, request: Request) -> BoxFuture<'_, FetchResult<Response>> {
        Box::pin(Dispatcher::fetch(self, request))
    }
}

/// Turn a resolved inject result into a [`Response`].
fn assemble(method: &Method, result: InjectResult, url_list: Vec<Url>) -> FetchResult<Response> {
    let InjectResult {
        status_code,
        status_message,
        headers,
        raw_payload,
    } = result;
    let mut headers = from_multi_value_headers(&headers)?;

    let body = if *method == Method::HEAD || status_code == 204 || status_code == 304 {
        (!raw_payload.is_empty()).then_some(raw_payload)
    } else {
        let body = decode(raw_payload, &mut headers)?;
        if let Some(body) = &body {
            if headers.has(CONTENT_LENGTH.as_str()) {
                headers.set(CONTENT_LENGTH.as_str(), &body.len().to_string())?;
            }
        }
        body
    };

    tracing::debug!(
        status = status_code,
        hops = url_list.len(),
        body_bytes = body.as_ref().map(|b| b.len()).unwrap_or(0),
        "Response assembled"
    );

    Ok(Response::new(status_code, status_message, headers, body)
        .with_url_list(url_list)
        .with_type(ResponseType::Basic))
}

enum TransportSource {
    Ready(Arc<dyn Transport>),
    Router(Router),
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder {
    transport: TransportSource,
    matcher: Option<Arc<dyn Matcher>>,
    network: Option<Arc<dyn NetworkFetch>>,
    config: FetchConfig,
}

impl DispatcherBuilder {
    fn new(transport: TransportSource) -> Self {
        Self {
            transport,
            matcher: None,
            network: None,
            config: FetchConfig::default(),
        }
    }

    /// Override the match predicate. Defaults to the configured intercept rules.
    pub fn matcher(mut self, matcher: impl Matcher + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Override the network fallback. Defaults to [`ReqwestFetch`].
    pub fn network(mut self, network: impl NetworkFetch + 'static) -> Self {
        self.network = Some(Arc::new(network));
        self
    }

    pub fn config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> FetchResult<Dispatcher> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;

        let transport = match self.transport {
            TransportSource::Ready(transport) => transport,
            TransportSource::Router(router) => Arc::new(RouterTransport::with_config(router, &self.config)),
        };
        let matcher = match self.matcher {
            Some(matcher) => matcher,
            None => Arc::from(routing::from_config(&self.config.intercept)),
        };
        let network = match self.network {
            Some(network) => network,
            None => Arc::new(ReqwestFetch::new()?),
        };

        tracing::debug!(
            max_dispatches = self.config.max_dispatches,
            user_agent = %self.config.user_agent,
            "Dispatcher built"
        );

        Ok(Dispatcher {
            transport,
            matcher,
            network,
            config: Arc::new(self.config),
        })
    }
}
