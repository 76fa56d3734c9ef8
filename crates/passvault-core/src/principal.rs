//! Strongly-typed caller identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A principal: the unique identifier of a caller.
///
/// Semantically an account address or public-key-derived identifier. The
/// value is opaque to the store and immutable once observed; two calls carry
/// the same identity exactly when their principals compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a new principal, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the principal as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
