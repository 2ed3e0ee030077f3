//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent sent on injected requests that do not carry one.
    pub user_agent: String,

    /// Total dispatches allowed per fetch (original request + redirects).
    pub max_dispatches: u32,

    /// Upper bound when collecting an injected response body.
    pub max_body_bytes: usize,

    /// Which requests are served in-process.
    pub intercept: InterceptConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "inject-fetch".to_string(),
            max_dispatches: 5,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            intercept: InterceptConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Intercept rules. Empty rules intercept everything.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct InterceptConfig {
    /// Hosts served in-process (case-insensitive). Empty = any host.
    pub hosts: Vec<String>,

    /// Path prefix served in-process.
    pub path_prefix: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
