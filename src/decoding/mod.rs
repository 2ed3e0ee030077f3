//! Content-decoding subsystem.
//!
//! # Data Flow
//! ```text
//! raw payload + content-encoding
//!     → pipeline.rs (plan: tokens → decode steps + leftover tokens)
//!     → coding.rs (gunzip / inflate / brotli, one step at a time)
//!     → decoded payload + rewritten content-encoding
//! ```
//!
//! # Design Decisions
//! - Steps run strictly in sequence; each consumes the previous output
//! - Unknown tokens are never skipped over
//! - Decoding errors propagate; nothing is swallowed or retried

pub mod coding;
pub mod pipeline;

use thiserror::Error;

use crate::headers::HeaderError;

pub use coding::ContentCoding;
pub use pipeline::{decode, DecodePlan};

/// Errors raised while removing content codings.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not a valid stream for the declared coding.
    #[error("Failed to decode {coding} content: {source}")]
    Corrupt {
        coding: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The rewritten `content-encoding` value could not be stored.
    #[error(transparent)]
    Header(HeaderError),
}
