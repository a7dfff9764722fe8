//! Product identifiers as they appear in the feed.
//!
//! Feed IDs are free text chosen by whoever maintains the sheet (`"1"`,
//! `"SKU-004"`), so they are kept as strings rather than parsed as numbers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a product row in the feed.
///
/// The ID is informational only: cart lines are keyed by product name, which
/// is what the shopper sees and what the order message lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID. Surrounding whitespace is removed.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_owned())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        assert_eq!(ProductId::new("  SKU-004 ").as_str(), "SKU-004");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
