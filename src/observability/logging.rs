//! Structured logging.
//!
//! # Responsibilities
//! - Initialize a `tracing` subscriber for binaries and tests
//! - Configure the log level from config, overridable by environment
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Initialization is idempotent: a second call is a no-op

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Install a global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("inject_fetch={}", config.log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
