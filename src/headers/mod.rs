//! Header models and the translator between them.
//!
//! # Data Flow
//! ```text
//! Request headers (Headers)
//!     → translate.rs (to_multi_value_headers)
//!     → transport (MultiValueHeaders)
//!     → InjectResult headers (MultiValueHeaders)
//!     → translate.rs (from_multi_value_headers)
//!     → Response headers (Headers)
//! ```
//!
//! # Design Decisions
//! - `Headers` wraps `http::HeaderMap`, so name folding is the map's job
//! - The `set-cookie` exception lives only in translate.rs and cookies.rs
//! - Absent and empty values never become empty-string entries

pub mod collection;
pub mod cookies;
pub mod multi_value;
pub mod translate;

use thiserror::Error;

pub use collection::Headers;
pub use cookies::split_cookies;
pub use multi_value::{MultiValue, MultiValueHeaders};
pub use translate::{from_multi_value_headers, to_multi_value_headers};

/// Errors produced when building a header collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Invalid header name: {0:?}")]
    InvalidName(String),

    #[error("Invalid value for header {name:?}: {value:?}")]
    InvalidValue { name: String, value: String },
}
