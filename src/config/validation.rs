//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (dispatch limit, body limit)
//! - Check intercept rules are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FetchConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::FetchConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("max_dispatches must be at least 1")]
    NoDispatches,

    #[error("max_body_bytes must be greater than 0")]
    ZeroBodyLimit,

    #[error("user_agent must not be empty")]
    EmptyUserAgent,

    #[error("intercept host #{0} is empty")]
    EmptyHost(usize),

    #[error("intercept path_prefix {0:?} must start with '/'")]
    RelativePathPrefix(String),
}

/// Check a configuration, collecting every violation.
pub fn validate_config(config: &FetchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.max_dispatches == 0 {
        errors.push(ValidationError::NoDispatches);
    }
    if config.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.user_agent.trim().is_empty() {
        errors.push(ValidationError::EmptyUserAgent);
    }
    for (i, host) in config.intercept.hosts.iter().enumerate() {
        if host.trim().is_empty() {
            errors.push(ValidationError::EmptyHost(i));
        }
    }
    if let Some(prefix) = &config.intercept.path_prefix {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativePathPrefix(prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
