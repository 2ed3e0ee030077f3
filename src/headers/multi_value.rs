//! Node-style multi-valued header map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// One entry of a [`MultiValueHeaders`] map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultiValue {
    /// An explicitly unset entry; dropped on translation.
    Absent,
    Number(i64),
    Text(String),
    List(Vec<String>),
    /// Header lines that are not valid UTF-8 (obs-text), byte for byte.
    /// Serialized as latin-1 strings.
    #[serde(skip_deserializing, serialize_with = "serialize_latin1")]
    Opaque(Vec<Vec<u8>>),
}

impl From<&str> for MultiValue {
    fn from(value: &str) -> Self {
        MultiValue::Text(value.to_string())
    }
}

impl From<String> for MultiValue {
    fn from(value: String) -> Self {
        MultiValue::Text(value)
    }
}

impl From<i64> for MultiValue {
    fn from(value: i64) -> Self {
        MultiValue::Number(value)
    }
}

impl From<Vec<String>> for MultiValue {
    fn from(values: Vec<String>) -> Self {
        MultiValue::List(values)
    }
}

impl<T: Into<MultiValue>> From<Option<T>> for MultiValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(MultiValue::Absent)
    }
}

impl MultiValue {
    /// The textual values this entry carries; empty strings are skipped.
    pub fn values(&self) -> Vec<String> {
        match self {
            MultiValue::Absent => Vec::new(),
            MultiValue::Number(n) => vec![n.to_string()],
            MultiValue::Text(s) if s.is_empty() => Vec::new(),
            MultiValue::Text(s) => vec![s.clone()],
            MultiValue::List(items) => items.iter().filter(|s| !s.is_empty()).cloned().collect(),
            MultiValue::Opaque(lines) => lines
                .iter()
                .filter(|line| !line.is_empty())
                .map(|line| String::from_utf8_lossy(line).into_owned())
                .collect(),
        }
    }
}

fn serialize_latin1<S: Serializer>(lines: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        lines
            .iter()
            .map(|line| line.iter().map(|&b| b as char).collect::<String>()),
    )
}

/// Header map whose values may be absent, scalar, or a list.
///
/// Keys are kept as given and iterate in insertion order; case folding
/// happens when the map is translated into a [`Headers`](super::Headers)
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValueHeaders(IndexMap<String, MultiValue>);

impl MultiValueHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MultiValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<&MultiValue> {
        self.0.get(name)
    }

    /// Values of every key that matches `name` case-insensitively.
    pub fn values_of(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .flat_map(|(_, value)| value.values())
            .collect()
    }

    pub fn remove(&mut self, name: &str) -> Option<MultiValue> {
        self.0.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MultiValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<MultiValue>> FromIterator<(K, V)> for MultiValueHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
