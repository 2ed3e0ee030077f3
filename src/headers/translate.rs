//! Conversion between [`MultiValueHeaders`] and [`Headers`].
//!
//! The two functions are inverses for every header except `set-cookie`,
//! which is never comma-joined: it is carried as separate entries in the
//! collection and as a list in the map. Values that are not valid UTF-8
//! travel as [`MultiValue::Opaque`] so their bytes survive the round trip.

use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;

use super::cookies::split_cookies;
use super::{HeaderError, Headers, MultiValue, MultiValueHeaders};

/// Flatten a collection into a node-style map with lower-case keys.
pub fn to_multi_value_headers(headers: &Headers) -> MultiValueHeaders {
    let mut map = MultiValueHeaders::new();

    for name in headers.names() {
        let raw: Vec<&HeaderValue> = headers
            .as_header_map()
            .get_all(name.as_str())
            .iter()
            .filter(|v| !v.is_empty())
            .collect();
        if raw.iter().any(|v| std::str::from_utf8(v.as_bytes()).is_err()) {
            map.insert(name, opaque(&raw));
            continue;
        }

        if name == SET_COOKIE.as_str() {
            let mut cookies: Vec<String> = headers
                .get_set_cookie()
                .iter()
                .flat_map(|value| split_cookies(value))
                .collect();
            match cookies.len() {
                0 => {}
                1 => map.insert(name, cookies.remove(0)),
                _ => map.insert(name, cookies),
            }
            continue;
        }

        let values: Vec<String> = headers
            .get_all(&name)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            map.insert(name, values.join(", "));
        }
    }

    map
}

/// One raw line per header value, never joined or split.
fn opaque(raw: &[&HeaderValue]) -> MultiValue {
    MultiValue::Opaque(raw.iter().map(|v| v.as_bytes().to_vec()).collect())
}

/// Build a collection from a node-style map, dropping absent and empty values.
pub fn from_multi_value_headers(map: &MultiValueHeaders) -> Result<Headers, HeaderError> {
    let mut headers = Headers::new();

    for (name, value) in map.iter() {
        match value {
            MultiValue::Opaque(lines) => {
                for line in lines.iter().filter(|line| !line.is_empty()) {
                    headers.append_bytes(name, line)?;
                }
            }
            _ => {
                for entry in value.values() {
                    headers.append(name, &entry)?;
                }
            }
        }
    }

    Ok(headers)
}
