//! WHATWG-style header collection.

use axum::http::header::{HeaderName, HeaderValue, SET_COOKIE};
use axum::http::HeaderMap;

use super::HeaderError;

/// Case-insensitive, multi-valued header collection.
///
/// `get` joins every value of a name with `", "` the way Fetch `Headers`
/// does; `get_all` and `get_set_cookie` expose the individual entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    inner: HeaderMap,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, keeping any existing values for `name`.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        let (name, value) = parse_pair(name, value)?;
        self.inner.append(name, value);
        Ok(())
    }

    /// Add a raw value; bytes outside UTF-8 (obs-text) are kept as-is.
    pub fn append_bytes(&mut self, name: &str, value: &[u8]) -> Result<(), HeaderError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HeaderError::InvalidName(name.to_string()))?;
        let header_value = HeaderValue::from_bytes(value.trim_ascii()).map_err(|_| HeaderError::InvalidValue {
            name: name.to_string(),
            value: String::from_utf8_lossy(value).into_owned(),
        })?;
        self.inner.append(header_name, header_value);
        Ok(())
    }

    /// Replace every value of `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        let (name, value) = parse_pair(name, value)?;
        self.inner.insert(name, value);
        Ok(())
    }

    /// Combined value of `name`, or `None` when absent.
    pub fn get(&self, name: &str) -> Option<String> {
        let values = self.get_all(name);
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Every value of `name`, in insertion order.
    ///
    /// Values that are not valid UTF-8 are decoded lossily; use
    /// [`as_header_map`](Self::as_header_map) for the raw bytes.
    pub fn get_all(&self, name: &str) -> Vec<String> {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => self
                .inner
                .get_all(&name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// The individual `set-cookie` entries.
    pub fn get_set_cookie(&self) -> Vec<String> {
        self.get_all(SET_COOKIE.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        HeaderName::from_bytes(name.as_bytes())
            .map(|name| self.inner.contains_key(&name))
            .unwrap_or(false)
    }

    pub fn delete(&mut self, name: &str) {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            self.inner.remove(&name);
        }
    }

    /// Lower-cased header names, sorted, without duplicates.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.keys().map(|k| k.as_str().to_string()).collect();
        names.sort();
        names
    }

    /// `(name, combined value)` pairs sorted by name; `set-cookie` entries
    /// are yielded one per value, as Fetch does.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for name in self.names() {
            if name == SET_COOKIE.as_str() {
                for cookie in self.get_set_cookie() {
                    entries.push((name.clone(), cookie));
                }
            } else if let Some(value) = self.get(&name) {
                entries.push((name, value));
            }
        }
        entries
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.inner.keys_len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_header_map(&self) -> &HeaderMap {
        &self.inner
    }

    pub fn into_header_map(self) -> HeaderMap {
        self.inner
    }
}

impl From<HeaderMap> for Headers {
    fn from(inner: HeaderMap) -> Self {
        Self { inner }
    }
}

fn parse_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HeaderError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| HeaderError::InvalidName(name.to_string()))?;
    let header_value = HeaderValue::from_str(value.trim()).map_err(|_| HeaderError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    Ok((header_name, header_value))
}
