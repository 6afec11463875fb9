//! Relationship model: records, composite keys and the asset link filter.

pub mod filter;
pub mod key;
pub mod records;

pub use filter::{asset_urn, classify_link, LinkVerdict, RejectReason, ASSET_URN_PREFIX};
pub use key::{RelationshipKey, KEY_SEPARATOR};
pub use records::{DependencyRecord, LinkRecord, RelationshipKind, RemoteRelation};
