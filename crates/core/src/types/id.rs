//! Newtype ID for type-safe product references.

use serde::{Deserialize, Serialize};

/// Opaque product identifier assigned by the remote catalog service.
///
/// Wrapping the raw string prevents product ids from being mixed up with
/// other string-typed values (queries, tokens) at API seams. Ids are
/// compared exactly; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the underlying id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::from("v4sLtEcMpzabRyfx");
        assert_eq!(id.to_string(), "v4sLtEcMpzabRyfx");
    }

    #[test]
    fn test_product_id_str_comparison() {
        let id = ProductId::from("KCRwjF7lN97HnEaY");
        assert_eq!(id, "KCRwjF7lN97HnEaY");
        assert_ne!(id, "BW0jAAeDJmlZCF8i");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::from("upLK9JbQ4rMhTwt4");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"upLK9JbQ4rMhTwt4\"");
    }
}
