//! Composite keys indexing cached relationships.

use std::fmt;

use serde::Serialize;

/// Separator between the left and right identifiers of a key.
pub const KEY_SEPARATOR: char = ':';

/// Deterministic key of one relationship: `left:right`.
///
/// Order matters, so `(A, B)` and `(B, A)` are distinct keys. Identifiers
/// are joined verbatim; an identifier that itself contains the separator
/// can collide with another pair, which [`RelationshipKey::is_ambiguous`]
/// reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RelationshipKey(String);

impl RelationshipKey {
    /// Key of a dependency between two asset IDs.
    #[must_use]
    pub fn dependency(left_id: &str, right_id: &str) -> Self {
        Self::join(left_id, right_id)
    }

    /// Key of a link between two asset IDs (URN prefixes already stripped).
    #[must_use]
    pub fn link(left_asset_id: &str, right_asset_id: &str) -> Self {
        Self::join(left_asset_id, right_asset_id)
    }

    fn join(left: &str, right: &str) -> Self {
        let key = Self(format!("{left}{KEY_SEPARATOR}{right}"));
        if key.is_ambiguous() {
            tracing::warn!(key = %key, "asset identifier contains the key separator");
        }
        key
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the key holds more than one separator and so
    /// cannot be split back into its two identifiers unambiguously.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.0.matches(KEY_SEPARATOR).count() > 1
    }

    /// Splits the key into `(left, right)` when it is unambiguous.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, &str)> {
        if self.is_ambiguous() {
            return None;
        }
        self.0.split_once(KEY_SEPARATOR)
    }
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelationshipKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
