//! Origin comparison.

use url::{Origin, Url};

/// True when `a` and `b` share an origin.
///
/// Two opaque origins compare equal; tuple origins compare by scheme, host
/// and (default-resolved) port.
pub fn same_origin(a: &Url, b: &Url) -> bool {
    match (a.origin(), b.origin()) {
        (Origin::Opaque(_), Origin::Opaque(_)) => true,
        (a, b) => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_origin() {
        assert!(same_origin(&url("https://example.com/a"), &url("https://example.com:443/b?x")));
        assert!(!same_origin(&url("https://example.com/"), &url("http://example.com/")));
        assert!(!same_origin(&url("https://example.com/"), &url("https://api.example.com/")));
        assert!(!same_origin(&url("http://example.com:8080/"), &url("http://example.com/")));
    }

    #[test]
    fn test_opaque_origins() {
        assert!(same_origin(&url("data:,a"), &url("data:,b")));
        assert!(!same_origin(&url("data:,a"), &url("http://example.com/")));
    }
}
