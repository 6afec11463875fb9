//! Desired relationship state fed into the reconciler.
//!
//! The source dataset arrives as a YAML document:
//!
//! ```yaml
//! dependencies:
//!   - left: "1001"
//!     right: "1002"
//!     dependency: Runs On
//! links:
//!   - left: "1001"
//!     right: "1003"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::relation::RelationshipKey;

/// A dependency that should exist remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredDependency {
    /// Asset that depends on the other.
    pub left: String,
    /// Asset depended upon.
    pub right: String,
    /// Dependency descriptor.
    pub dependency: String,
}

impl DesiredDependency {
    /// Cache key of this dependency.
    #[must_use]
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey::dependency(&self.left, &self.right)
    }
}

/// A link that should exist remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredLink {
    /// Left asset ID.
    pub left: String,
    /// Right asset ID.
    pub right: String,
}

impl DesiredLink {
    /// Cache key of this link.
    #[must_use]
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey::link(&self.left, &self.right)
    }
}

/// The full desired state of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredState {
    /// Dependencies to converge.
    #[serde(default)]
    pub dependencies: Vec<DesiredDependency>,
    /// Links to converge.
    #[serde(default)]
    pub links: Vec<DesiredLink>,
}

impl DesiredState {
    /// Parses desired state from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error string if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse desired state: {e}"))
    }

    /// Loads desired state from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read desired state {}: {e}", path.display()))?;
        Self::from_yaml(&content)
    }
}
