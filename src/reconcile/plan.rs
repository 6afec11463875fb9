//! Per-relationship decisions and removal candidates.
//!
//! Decisions are made against the cache as it stands at the moment of the
//! call, so a relationship created earlier in the same run is seen as
//! existing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cache::{AssetDependencyCache, AssetLinkCache};
use crate::desired::{DesiredDependency, DesiredLink};
use crate::relation::{RelationshipKey, RelationshipKind};

/// What the reconciler will do (or did) for one relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    /// Create a dependency that does not exist remotely.
    CreateDependency {
        /// Relationship key.
        key: RelationshipKey,
        /// Descriptor of the new dependency.
        dependency: String,
    },
    /// Change the descriptor of an existing dependency.
    UpdateDependency {
        /// Relationship key.
        key: RelationshipKey,
        /// Remote ID of the cached record, if known.
        remote_id: Option<String>,
        /// Current descriptor.
        from: String,
        /// Desired descriptor.
        to: String,
    },
    /// Delete a dependency absent from desired state.
    DeleteDependency {
        /// Relationship key.
        key: RelationshipKey,
        /// Remote ID of the cached record, if known.
        remote_id: Option<String>,
    },
    /// Link two assets.
    Link {
        /// Relationship key.
        key: RelationshipKey,
    },
    /// Unlink two assets.
    Unlink {
        /// Relationship key.
        key: RelationshipKey,
    },
    /// The relationship already matches desired state.
    Unchanged {
        /// Relationship kind.
        kind: RelationshipKind,
        /// Relationship key.
        key: RelationshipKey,
    },
}

impl SyncAction {
    /// Whether the action changes remote state.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }
}

/// Decides what to do for one desired dependency.
#[must_use]
pub fn decide_dependency(desired: &DesiredDependency, cache: &AssetDependencyCache) -> SyncAction {
    let key = desired.key();
    match cache.get(&key) {
        None => SyncAction::CreateDependency { key, dependency: desired.dependency.clone() },
        Some(existing) if existing.dependency != desired.dependency => {
            SyncAction::UpdateDependency {
                key,
                remote_id: existing.remote_id.clone(),
                from: existing.dependency.clone(),
                to: desired.dependency.clone(),
            }
        }
        Some(_) => SyncAction::Unchanged { kind: RelationshipKind::Dependency, key },
    }
}

/// Decides what to do for one desired link.
#[must_use]
pub fn decide_link(desired: &DesiredLink, cache: &AssetLinkCache) -> SyncAction {
    let key = desired.key();
    if cache.contains(&key) {
        SyncAction::Unchanged { kind: RelationshipKind::Link, key }
    } else {
        SyncAction::Link { key }
    }
}

/// Cached dependency keys that desired state does not mention.
#[must_use]
pub fn dependency_removals(
    desired: &[DesiredDependency],
    cache: &AssetDependencyCache,
) -> Vec<RelationshipKey> {
    let wanted: BTreeSet<RelationshipKey> = desired.iter().map(DesiredDependency::key).collect();
    cache.keys().filter(|key| !wanted.contains(*key)).cloned().collect()
}

/// Cached link keys that desired state does not mention in either
/// direction.
///
/// Links are symmetric: the instance stores `a:b` and `b:a` for one link,
/// so a desired `a:b` keeps both.
#[must_use]
pub fn link_removals(desired: &[DesiredLink], cache: &AssetLinkCache) -> Vec<RelationshipKey> {
    let wanted: BTreeSet<RelationshipKey> = desired
        .iter()
        .flat_map(|link| [link.key(), RelationshipKey::link(&link.right, &link.left)])
        .collect();
    cache.keys().filter(|key| !wanted.contains(*key)).cloned().collect()
}

/// Formats actions as a human-readable report.
#[must_use]
pub fn format_actions(actions: &[SyncAction]) -> String {
    if actions.is_empty() {
        return "No relationships to sync.".to_string();
    }

    let id = |remote_id: &Option<String>| remote_id.clone().unwrap_or_else(|| "new".to_string());
    actions
        .iter()
        .map(|action| match action {
            SyncAction::CreateDependency { key, dependency } => {
                format!("  CREATE dependency {key}: {dependency}")
            }
            SyncAction::UpdateDependency { key, remote_id, from, to } => {
                format!("  UPDATE dependency {key} (id {}): {from} -> {to}", id(remote_id))
            }
            SyncAction::DeleteDependency { key, remote_id } => {
                format!("  DELETE dependency {key} (id {})", id(remote_id))
            }
            SyncAction::Link { key } => format!("  LINK {key}"),
            SyncAction::Unlink { key } => format!("  UNLINK {key}"),
            SyncAction::Unchanged { kind: RelationshipKind::Dependency, key } => {
                format!("  UNCHANGED dependency {key}")
            }
            SyncAction::Unchanged { kind: RelationshipKind::Link, key } => {
                format!("  UNCHANGED link {key}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
