//! Known content codings and their decoders.

use std::fmt;
use std::io::Read;

use brotli::Decompressor;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

use super::DecodeError;

const BROTLI_BUFFER_SIZE: usize = 4096;

/// A content coding this crate knows how to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Deflate,
    Brotli,
}

impl ContentCoding {
    /// Match a `content-encoding` token, case-insensitively.
    /// The `x-` vendor spellings are accepted for gzip and deflate.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Some(ContentCoding::Gzip),
            "deflate" | "x-deflate" => Some(ContentCoding::Deflate),
            "br" => Some(ContentCoding::Brotli),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContentCoding::Gzip => "gzip",
            ContentCoding::Deflate => "deflate",
            ContentCoding::Brotli => "br",
        }
    }

    /// Undo this coding on `input`.
    pub fn decode(self, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut output = Vec::new();
        let result = match self {
            ContentCoding::Gzip => GzDecoder::new(input).read_to_end(&mut output),
            ContentCoding::Deflate if is_zlib_wrapped(input) => {
                ZlibDecoder::new(input).read_to_end(&mut output)
            }
            // Raw deflate from old IIS/Apache servers.
            ContentCoding::Deflate => DeflateDecoder::new(input).read_to_end(&mut output),
            ContentCoding::Brotli => {
                Decompressor::new(input, BROTLI_BUFFER_SIZE).read_to_end(&mut output)
            }
        };

        result.map_err(|source| DecodeError::Corrupt {
            coding: self.name(),
            source,
        })?;
        Ok(output)
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A zlib stream's first byte carries compression method 8 in its low nibble.
fn is_zlib_wrapped(input: &[u8]) -> bool {
    input.first().is_some_and(|b| b & 0x0f == 0x08)
}
