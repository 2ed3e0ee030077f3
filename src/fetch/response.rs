//! Fetch `Response` value.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::FetchResult;
use crate::headers::Headers;

/// Fetch response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Served in-process.
    Basic,
    /// Synthesized locally or returned by the network fallback.
    Default,
    /// The opaque network-error sentinel.
    Error,
}

/// A fully assembled response; the body is already buffered and decoded.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    status_text: String,
    headers: Headers,
    body: Option<Bytes>,
    url_list: Vec<Url>,
    kind: ResponseType,
}

impl Response {
    pub fn new(status: u16, status_text: impl Into<String>, headers: Headers, body: Option<Bytes>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers,
            body,
            url_list: Vec::new(),
            kind: ResponseType::Default,
        }
    }

    /// The network-error sentinel: status 0, no headers, no body.
    pub fn network_error() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: Headers::new(),
            body: None,
            url_list: Vec::new(),
            kind: ResponseType::Error,
        }
    }

    /// Attach the URLs visited while producing this response.
    pub fn with_url_list(mut self, url_list: Vec<Url>) -> Self {
        self.url_list = url_list;
        self
    }

    pub fn with_type(mut self, kind: ResponseType) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn response_type(&self) -> ResponseType {
        self.kind
    }

    pub fn is_network_error(&self) -> bool {
        self.kind == ResponseType::Error
    }

    /// The final URL, if any.
    pub fn url(&self) -> Option<&Url> {
        self.url_list.last()
    }

    pub fn url_list(&self) -> &[Url] {
        &self.url_list
    }

    /// True when one or more redirects were followed.
    pub fn redirected(&self) -> bool {
        self.url_list.len() > 1
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body bytes; empty when there is no body.
    pub fn bytes(&self) -> Bytes {
        self.body.clone().unwrap_or_default()
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }

    pub fn json<T: DeserializeOwned>(&self) -> FetchResult<T> {
        Ok(serde_json::from_slice(&self.bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_shape() {
        let res = Response::network_error();
        assert_eq!(res.status(), 0);
        assert!(!res.ok());
        assert!(res.is_network_error());
        assert!(res.headers().is_empty());
        assert!(res.body().is_none());
        assert!(res.url().is_none());
    }

    #[test]
    fn test_redirected_follows_url_list() {
        let a = Url::parse("http://example.com/a").unwrap();
        let b = Url::parse("http://example.com/b").unwrap();

        let single = Response::new(200, "OK", Headers::new(), None).with_url_list(vec![a.clone()]);
        assert!(!single.redirected());

        let chained = Response::new(200, "OK", Headers::new(), None).with_url_list(vec![a, b.clone()]);
        assert!(chained.redirected());
        assert_eq!(chained.url(), Some(&b));
    }

    #[test]
    fn test_json_body() {
        let res = Response::new(200, "OK", Headers::new(), Some(Bytes::from_static(b"{\"n\":1}")));
        let value: serde_json::Value = res.json().unwrap();
        assert_eq!(value["n"], 1);
        assert!(res.ok());
    }
}
