//! Relationship records as returned by the instance.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::key::RelationshipKey;

/// The two relationship kinds this tool reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Directed asset-to-asset dependency.
    Dependency,
    /// Symmetric asset-to-asset link.
    Link,
}

impl RelationshipKind {
    /// Plural noun used in progress and summary messages.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Dependency => "asset dependencies",
            Self::Link => "asset links",
        }
    }
}

/// A record type fetched by paging through a relationship query.
pub trait RemoteRelation: DeserializeOwned {
    /// Kind of relationship this record represents.
    const KIND: RelationshipKind;
}

/// A directed "depends-on" edge between two assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Primary key assigned by the instance; `None` until the record is
    /// re-read after being created in this run.
    #[serde(rename = "h_pk_confitemdependencyid")]
    pub remote_id: Option<String>,
    /// Asset that depends on the other.
    #[serde(rename = "h_entity_l_id")]
    pub left_id: String,
    /// Asset depended upon.
    #[serde(rename = "h_entity_r_id")]
    pub right_id: String,
    /// Free-text dependency descriptor, e.g. "Runs On".
    #[serde(rename = "h_dependency", default)]
    pub dependency: String,
}

impl DependencyRecord {
    /// Cache key of this dependency.
    #[must_use]
    pub fn key(&self) -> RelationshipKey {
        RelationshipKey::dependency(&self.left_id, &self.right_id)
    }
}

impl RemoteRelation for DependencyRecord {
    const KIND: RelationshipKind = RelationshipKind::Dependency;
}

/// A symmetric link between two entities identified by URN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Primary key assigned by the instance.
    #[serde(rename = "h_pk_id")]
    pub remote_id: Option<String>,
    /// URN of the left entity.
    #[serde(rename = "h_fk_id_l")]
    pub left_urn: String,
    /// URN of the right entity.
    #[serde(rename = "h_fk_id_r")]
    pub right_urn: String,
}

impl RemoteRelation for LinkRecord {
    const KIND: RelationshipKind = RelationshipKind::Link;
}
