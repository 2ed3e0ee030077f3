//! Intercept routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request URL + Request
//!     → matcher.rs (evaluate match predicate)
//!     → true:  served in-process (transport)
//!     → false: handed to the network fallback
//!
//! Matcher Compilation (at build time):
//!     InterceptConfig
//!     → HostMatcher / PathPrefixMatcher
//!     → AndMatcher
//!     → Freeze as immutable Arc<dyn Matcher>
//! ```
//!
//! # Design Decisions
//! - Matchers compiled once, immutable at runtime
//! - Deterministic: same input always gives the same answer
//! - Redirect targets are re-checked with the same matcher

pub mod matcher;

pub use matcher::{from_config, AlwaysMatcher, AndMatcher, HostMatcher, Matcher, PathPrefixMatcher};
