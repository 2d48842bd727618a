//! Query key composition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySegment {
    /// Text segment (entity names, slugs).
    Text(String),
    /// Integer segment (ids, page numbers).
    Int(i64),
    /// Boolean segment (filter flags).
    Bool(bool),
}

impl From<&str> for KeySegment {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeySegment {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for KeySegment {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for KeySegment {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A cache key uniquely identifying one query.
///
/// Keys are an ordered sequence of primitive segments; two keys with the
/// same segments in a different order identify different queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey {
    segments: Vec<KeySegment>,
}

impl QueryKey {
    /// Create a key from a list of segments.
    pub fn new(segments: Vec<KeySegment>) -> Self {
        Self { segments }
    }

    /// Append a segment.
    pub fn with_segment(mut self, segment: impl Into<KeySegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Get the key segments.
    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the key has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for QueryKey {
    fn from(value: &str) -> Self {
        Self::new(vec![KeySegment::from(value)])
    }
}

impl From<String> for QueryKey {
    fn from(value: String) -> Self {
        Self::new(vec![KeySegment::from(value)])
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(":"))
    }
}

/// Build a [`QueryKey`] from a list of segments.
///
/// # Example
///
/// ```rust,ignore
/// let key = query_key!["products", 42, true];
/// assert_eq!(key.to_string(), "products:42:true");
/// ```
#[macro_export]
macro_rules! query_key {
    ($($segment:expr),+ $(,)?) => {{
        $crate::QueryKey::new(vec![$($crate::KeySegment::from($segment)),+])
    }};
}
