//! Error taxonomy for the dispatch engine.
//!
//! Malformed input is rejected synchronously before any transport I/O.
//! Redirect-level failures are NOT errors: they surface as the opaque
//! network-error [`Response`](crate::fetch::Response) value instead.

use axum::BoxError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::decoding::DecodeError;
use crate::fetch::data_uri::DataUriError;
use crate::headers::HeaderError;

/// Errors surfaced to callers of [`Dispatcher::fetch`](crate::Dispatcher::fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL scheme is outside `data`, `http` and `https`.
    #[error("URL scheme \"{0}\" is not supported.")]
    UnsupportedScheme(String),

    /// The method is outside the allowed set.
    #[error("Method \"{0}\" is not supported; must be equal to one of the allowed values")]
    UnsupportedMethod(String),

    /// The request URL could not be parsed as an absolute URL.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value was rejected.
    #[error(transparent)]
    Header(#[from] HeaderError),

    /// A `data:` URL could not be decoded.
    #[error(transparent)]
    DataUri(#[from] DataUriError),

    /// The response body claimed a coding it is not valid for.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The in-process transport failed (e.g. the handler's body stream errored).
    #[error("{0}")]
    Transport(#[source] BoxError),

    /// The network fallback failed.
    #[error("Network fetch failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The dispatcher configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A JSON request or response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for dispatch operations.
pub type FetchResult<T> = Result<T, FetchError>;
