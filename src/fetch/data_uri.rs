//! `data:` URL decoding and response synthesis.
//!
//! These responses never touch the transport and never redirect.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

use super::response::Response;
use crate::error::FetchResult;
use crate::headers::Headers;

const DEFAULT_MIME: &str = "text/plain;charset=US-ASCII";

/// Standard alphabet, padding optional.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors raised while decoding a `data:` URL.
#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("Not a data: URL")]
    NotDataUrl,

    #[error("Invalid data: URL, missing ','")]
    MissingComma,

    #[error("Invalid base64 in data: URL: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Full MIME type including parameters, e.g. `text/plain;charset=utf-8`.
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Decode a `data:[<mediatype>][;base64],<data>` URL.
    pub fn parse(url: &str) -> Result<Self, DataUriError> {
        let rest = url
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &url[5..])
            .ok_or(DataUriError::NotDataUrl)?;

        // The fragment is not part of the payload.
        let rest = rest.split('#').next().unwrap_or_default();
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::MissingComma)?;

        let meta = meta.trim();
        let (mime, is_base64) = match meta.rsplit_once(';') {
            Some((mime, flag)) if flag.trim().eq_ignore_ascii_case("base64") => (mime.trim(), true),
            _ => (meta, false),
        };

        let mime_type = if mime.is_empty() {
            DEFAULT_MIME.to_string()
        } else if mime.starts_with(';') {
            format!("text/plain{}", mime)
        } else {
            mime.to_string()
        };

        let decoded: Vec<u8> = percent_decode_str(payload).collect();
        let data = if is_base64 {
            let compact: Vec<u8> = decoded.into_iter().filter(|b| !b.is_ascii_whitespace()).collect();
            FORGIVING.decode(compact)?
        } else {
            decoded
        };

        Ok(Self { mime_type, data })
    }
}

/// Synthesize a `200` response whose only header is `Content-Type`.
pub fn respond(url: &Url) -> FetchResult<Response> {
    let DataUri { mime_type, data } = DataUri::parse(url.as_str())?;

    let mut headers = Headers::new();
    headers.set(CONTENT_TYPE.as_str(), &mime_type)?;

    Ok(Response::new(200, "OK", headers, Some(Bytes::from(data))).with_url_list(vec![url.clone()]))
}
