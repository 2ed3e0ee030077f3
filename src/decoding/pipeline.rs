//! Ordered removal of content codings from a response payload.
//!
//! `content-encoding` lists codings in the order they were applied, so the
//! last token is the outermost layer. Decoding walks the list backwards and
//! stops at the first unknown token: anything applied before it cannot be
//! reached without undoing the unknown layer too.

use axum::body::Bytes;
use axum::http::header::CONTENT_ENCODING;

use super::coding::ContentCoding;
use super::DecodeError;
use crate::headers::{HeaderError, Headers};

/// The outcome of planning a decode: which steps run, which tokens remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodePlan {
    /// Decode steps in execution order (outermost coding first).
    pub steps: Vec<ContentCoding>,
    /// Tokens left undecoded, in their original relative order.
    pub remaining: Vec<String>,
}

impl DecodePlan {
    /// Build a plan from a raw `content-encoding` value.
    pub fn from_header(value: &str) -> Self {
        let mut remaining: Vec<String> = value
            .split(',')
            .map(|token| token.trim().to_ascii_lowercase())
            .filter(|token| !token.is_empty())
            .collect();

        let mut steps = Vec::new();
        while let Some(last) = remaining.last() {
            let Some(coding) = ContentCoding::from_token(last) else {
                break;
            };
            steps.push(coding);
            remaining.pop();
        }

        Self { steps, remaining }
    }

    /// Run every step in order, each consuming the previous step's output.
    pub fn apply(&self, payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
        self.steps
            .iter()
            .try_fold(payload.to_vec(), |body, coding| coding.decode(&body))
    }
}

/// Decode `raw_payload` according to the `content-encoding` in `headers`,
/// rewriting that header to list only the codings left in place.
///
/// A zero-length payload yields `None` without looking at the header.
pub fn decode(raw_payload: Bytes, headers: &mut Headers) -> Result<Option<Bytes>, DecodeError> {
    if raw_payload.is_empty() {
        return Ok(None);
    }

    let Some(value) = headers.get(CONTENT_ENCODING.as_str()) else {
        return Ok(Some(raw_payload));
    };

    let plan = DecodePlan::from_header(&value);
    if plan.steps.is_empty() {
        return Ok(Some(raw_payload));
    }

    tracing::trace!(
        steps = ?plan.steps,
        remaining = ?plan.remaining,
        "Decoding response payload"
    );

    let decoded = plan.apply(&raw_payload)?;
    rewrite_content_encoding(headers, &plan.remaining).map_err(DecodeError::Header)?;

    Ok(Some(Bytes::from(decoded)))
}

fn rewrite_content_encoding(headers: &mut Headers, remaining: &[String]) -> Result<(), HeaderError> {
    if remaining.is_empty() {
        headers.delete(CONTENT_ENCODING.as_str());
        Ok(())
    } else {
        headers.set(CONTENT_ENCODING.as_str(), &remaining.join(","))
    }
}
