//! Fetch `Request` value and its builder.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, FetchResult};
use crate::headers::Headers;

/// How 3xx responses are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectMode {
    /// Follow redirects up to the dispatch limit.
    #[default]
    Follow,
    /// Return the first redirect response as-is.
    Manual,
    /// Treat any redirect as a network error.
    Error,
}

/// An immutable request, consumed read-only by the dispatcher.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    method: String,
    headers: Headers,
    body: Option<Bytes>,
    redirect: RedirectMode,
}

impl Request {
    /// Start building a `GET` request for `url`.
    pub fn builder(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    /// A `GET` request with no headers or body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: Headers::new(),
            body: None,
            redirect: RedirectMode::Follow,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upper-cased method token.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn redirect(&self) -> RedirectMode {
        self.redirect
    }
}

/// Builder for [`Request`].
///
/// Header errors are remembered and reported by [`RequestBuilder::build`].
#[derive(Debug)]
pub struct RequestBuilder {
    inner: FetchResult<Request>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            inner: Ok(Request::get(url)),
        }
    }

    pub fn method(self, method: impl AsRef<str>) -> Self {
        self.and_then(|mut req| {
            req.method = method.as_ref().to_ascii_uppercase();
            Ok(req)
        })
    }

    /// Append a header value.
    pub fn header(self, name: &str, value: &str) -> Self {
        self.and_then(|mut req| {
            req.headers.append(name, value)?;
            Ok(req)
        })
    }

    pub fn redirect(self, mode: RedirectMode) -> Self {
        self.and_then(|mut req| {
            req.redirect = mode;
            Ok(req)
        })
    }

    /// Raw body bytes; no content type is implied.
    pub fn body(self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.and_then(|mut req| {
            req.body = Some(body);
            Ok(req)
        })
    }

    /// A UTF-8 text body, typed `text/plain;charset=UTF-8` unless a content
    /// type was already given.
    pub fn text(self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.with_default_type(Bytes::from(body), "text/plain;charset=UTF-8")
    }

    /// A JSON body, typed `application/json` unless a content type was
    /// already given.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => self.with_default_type(Bytes::from(body), "application/json"),
            Err(e) => Self { inner: Err(FetchError::Json(e)) },
        }
    }

    pub fn build(self) -> FetchResult<Request> {
        self.inner
    }

    fn with_default_type(self, body: Bytes, content_type: &str) -> Self {
        self.and_then(|mut req| {
            if !req.headers.has(CONTENT_TYPE.as_str()) {
                req.headers.set(CONTENT_TYPE.as_str(), content_type)?;
            }
            req.body = Some(body);
            Ok(req)
        })
    }

    fn and_then<F>(self, f: F) -> Self
    where
        F: FnOnce(Request) -> FetchResult<Request>,
    {
        Self {
            inner: self.inner.and_then(f),
        }
    }
}
