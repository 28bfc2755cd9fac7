//! Dataset and trace types
//!
//! - [`Entry`]: one row of the initial dataset
//! - [`Op`]: one operation of the replayed trace

use serde::{Deserialize, Serialize};

/// A key/value pair of the initial dataset
///
/// Keys are opaque fixed-format tokens, values opaque strings. No TTL, no
/// versioning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Key
    pub key: String,
    /// Value
    pub value: String,
}

impl Entry {
    /// Create a new entry
    ///
    /// # Examples
    ///
    /// ```
    /// use shardbench_core::Entry;
    ///
    /// let e = Entry::new("0000000a", "https://example.com");
    /// assert_eq!(e.key, "0000000a");
    /// ```
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One operation of a trace
///
/// Traces are built once at load time and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Look up a key
    Get(String),
    /// Insert or overwrite a key
    Set(String, String),
}

impl Op {
    /// Key touched by this operation
    #[inline]
    pub fn key(&self) -> &str {
        match self {
            Op::Get(key) | Op::Set(key, _) => key,
        }
    }

    /// Check if this is a read
    #[inline]
    pub fn is_read(&self) -> bool {
        matches!(self, Op::Get(_))
    }

    /// Check if this is a write
    #[inline]
    pub fn is_write(&self) -> bool {
        matches!(self, Op::Set(..))
    }
}

impl std::fmt::Display for Op {
    /// Trace-file form: `G <key>` or `S <key> <value>`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Get(key) => write!(f, "G {}", key),
            Op::Set(key, value) => write!(f, "S {} {}", key, value),
        }
    }
}
