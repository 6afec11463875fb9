//! In-memory caches of the relationships that exist remotely.
//!
//! Both caches are rebuilt from scratch at the start of a run and then
//! mutated in place as the reconciler applies changes. Nothing is persisted.

pub mod dependencies;
pub mod links;
pub mod paging;

use std::collections::btree_map::{self, BTreeMap};

pub use dependencies::{cache_asset_dependencies, populate_asset_dependencies};
pub use links::{cache_asset_links, populate_asset_links};
pub use paging::page_offsets;

use crate::relation::{DependencyRecord, LinkRecord, RelationshipKey};

/// Map from relationship key to the record cached under it.
///
/// Iteration is in key order, so reports and removal lists are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationCache<R> {
    entries: BTreeMap<RelationshipKey, R>,
}

/// Cache of asset-to-asset dependencies.
pub type AssetDependencyCache = RelationCache<DependencyRecord>;

/// Cache of asset-to-asset links.
pub type AssetLinkCache = RelationCache<LinkRecord>;

impl<R> Default for RelationCache<R> {
    fn default() -> Self {
        Self { entries: BTreeMap::new() }
    }
}

impl<R> RelationCache<R> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record cached under `key`.
    #[must_use]
    pub fn get(&self, key: &RelationshipKey) -> Option<&R> {
        self.entries.get(key)
    }

    /// Mutable access to the record cached under `key`.
    pub fn get_mut(&mut self, key: &RelationshipKey) -> Option<&mut R> {
        self.entries.get_mut(key)
    }

    /// Whether `key` is cached.
    #[must_use]
    pub fn contains(&self, key: &RelationshipKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Caches `record` under `key`, returning the record it replaced.
    pub fn insert(&mut self, key: RelationshipKey, record: R) -> Option<R> {
        self.entries.insert(key, record)
    }

    /// Removes and returns the record cached under `key`.
    pub fn remove(&mut self, key: &RelationshipKey) -> Option<R> {
        self.entries.remove(key)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, RelationshipKey, R> {
        self.entries.keys()
    }

    /// Cached entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, RelationshipKey, R> {
        self.entries.iter()
    }
}

impl<'a, R> IntoIterator for &'a RelationCache<R> {
    type Item = (&'a RelationshipKey, &'a R);
    type IntoIter = btree_map::Iter<'a, RelationshipKey, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
