//! In-process Fetch dispatcher.
//!
//! Serves Fetch-style requests by injecting them straight into an axum
//! [`Router`](axum::Router) instead of opening a socket. Redirects are
//! followed in-process, compressed bodies are decoded, and requests the
//! match predicate declines are handed to a real network fetch.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use inject_fetch::{Dispatcher, Request};
//!
//! # async fn run() -> inject_fetch::FetchResult<()> {
//! let app = Router::new().route("/hello", get(|| async { "world" }));
//! let dispatcher = Dispatcher::for_router(app)?;
//!
//! let res = dispatcher.fetch(Request::get("http://example.com/hello")).await?;
//! assert_eq!(res.text(), "world");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decoding;
pub mod error;
pub mod fetch;
pub mod headers;
pub mod observability;
pub mod routing;
pub mod transport;

pub use config::FetchConfig;
pub use error::{FetchError, FetchResult};
pub use fetch::{Dispatcher, DispatcherBuilder, RedirectMode, Request, RequestBuilder, Response, ResponseType};
pub use headers::{Headers, MultiValue, MultiValueHeaders};
pub use routing::Matcher;
pub use transport::{InjectRequest, InjectResult, NetworkFetch, ReqwestFetch, RouterTransport, Transport};
