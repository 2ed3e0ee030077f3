//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch / redirect / transport
//!     → tracing events (structured fields: url, hop, status)
//!     → logging.rs (subscriber with env filter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the caller's choice
//! - `RUST_LOG` wins over the configured level

pub mod logging;

pub use logging::init_logging;
