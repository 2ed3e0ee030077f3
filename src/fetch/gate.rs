//! URL scheme and method validation, run before any dispatch.

use axum::http::Method;
use url::Url;

use crate::error::{FetchError, FetchResult};

const SUPPORTED_SCHEMES: [&str; 3] = ["data", "http", "https"];

const SUPPORTED_METHODS: [Method; 7] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
];

/// Parse `raw` as an absolute URL.
pub fn parse_url(raw: &str) -> FetchResult<Url> {
    Url::parse(raw).map_err(|source| FetchError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Reject schemes other than `data`, `http` and `https`.
pub fn assert_supported_url(url: &Url) -> FetchResult<()> {
    if SUPPORTED_SCHEMES.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(FetchError::UnsupportedScheme(url.scheme().to_string()))
    }
}

/// Reject methods outside the allowed set; returns the normalized method.
pub fn assert_supported_method(method: &str) -> FetchResult<Method> {
    let upper = method.to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
        .ok_or_else(|| FetchError::UnsupportedMethod(method.to_string()))
}
