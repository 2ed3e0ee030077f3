//! Intercept matching logic.
//!
//! # Responsibilities
//! - Match URL host (exact match, case-insensitive)
//! - Match URL path prefix (case-sensitive)
//! - Combine conditions with AND semantics
//! - Accept plain closures as predicates
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110)
//! - Path matching is case-sensitive
//! - Empty condition = always matches (wildcard)
//! - No regex to guarantee O(n) matching

use url::Url;

use crate::config::InterceptConfig;
use crate::fetch::Request;

/// Decides whether a request is served in-process.
pub trait Matcher: Send + Sync {
    /// Returns true if the request should be intercepted.
    fn matches(&self, url: &Url, request: &Request) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(&Url, &Request) -> bool + Send + Sync,
{
    fn matches(&self, url: &Url, request: &Request) -> bool {
        self(url, request)
    }
}

/// Intercepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatcher;

impl Matcher for AlwaysMatcher {
    fn matches(&self, _url: &Url, _request: &Request) -> bool {
        true
    }
}

/// Matches one of a set of hosts.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    hosts: Vec<String>,
}

impl HostMatcher {
    /// Hosts are normalized to lowercase for case-insensitive matching.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(|h| h.into().to_lowercase()).collect(),
        }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, url: &Url, _request: &Request) -> bool {
        url.host_str()
            .map(|h| {
                let h = h.to_lowercase();
                self.hosts.iter().any(|expected| *expected == h)
            })
            .unwrap_or(false)
    }
}

/// Matches the URL path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, url: &Url, _request: &Request) -> bool {
        url.path().starts_with(&self.prefix)
    }
}

/// Combines multiple matchers with AND semantics.
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, url: &Url, request: &Request) -> bool {
        self.matchers.iter().all(|m| m.matches(url, request))
    }
}

/// Compile intercept rules. No rules means intercept everything.
pub fn from_config(config: &InterceptConfig) -> Box<dyn Matcher> {
    let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();

    if !config.hosts.is_empty() {
        matchers.push(Box::new(HostMatcher::new(config.hosts.iter().cloned())));
    }
    if let Some(prefix) = &config.path_prefix {
        matchers.push(Box::new(PathPrefixMatcher::new(prefix.clone())));
    }

    match matchers.len() {
        0 => Box::new(AlwaysMatcher),
        1 => matchers.remove(0),
        _ => Box::new(AndMatcher::new(matchers)),
    }
}
