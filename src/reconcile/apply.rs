//! Applies reconciliation actions through the client and keeps the caches
//! in step with what was sent.

use super::plan::{decide_dependency, decide_link, dependency_removals, link_removals, SyncAction};
use crate::cache::{AssetDependencyCache, AssetLinkCache};
use crate::client::RelationshipClient;
use crate::desired::{DesiredDependency, DesiredLink, DesiredState};
use crate::error::ReconcileError;
use crate::relation::{asset_urn, classify_link, DependencyRecord, LinkRecord, LinkVerdict, RelationshipKey};

/// Converges remote relationships toward a desired state.
///
/// The caches are only touched after the client reports success. Under a
/// dry-run policy the client reports success without sending anything, so
/// the caches still change as if each call had been applied.
pub struct Reconciler<'c, 'a> {
    client: &'c mut RelationshipClient<'a>,
    dependencies: AssetDependencyCache,
    links: AssetLinkCache,
    remove_both_sides: bool,
    applied: Vec<SyncAction>,
}

impl<'c, 'a> Reconciler<'c, 'a> {
    /// Creates a reconciler over freshly built caches.
    pub fn new(
        client: &'c mut RelationshipClient<'a>,
        dependencies: AssetDependencyCache,
        links: AssetLinkCache,
        remove_both_sides: bool,
    ) -> Self {
        Self { client, dependencies, links, remove_both_sides, applied: Vec::new() }
    }

    /// Current dependency cache.
    #[must_use]
    pub fn dependencies(&self) -> &AssetDependencyCache {
        &self.dependencies
    }

    /// Current link cache.
    #[must_use]
    pub fn links(&self) -> &AssetLinkCache {
        &self.links
    }

    /// Actions completed so far, in order.
    #[must_use]
    pub fn applied(&self) -> &[SyncAction] {
        &self.applied
    }

    /// Consumes the reconciler, returning the completed actions.
    #[must_use]
    pub fn into_applied(self) -> Vec<SyncAction> {
        self.applied
    }

    /// Creates dependency `left -> right`.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::AlreadyCached`] if the key exists; otherwise the
    /// client's failure.
    pub fn add_dependency(
        &mut self,
        left: &str,
        right: &str,
        dependency: &str,
    ) -> Result<(), ReconcileError> {
        let record = DependencyRecord {
            remote_id: None,
            left_id: left.to_string(),
            right_id: right.to_string(),
            dependency: dependency.to_string(),
        };
        let key = record.key();
        if self.dependencies.contains(&key) {
            return Err(ReconcileError::AlreadyCached { key });
        }

        self.client.create_dependency(&record)?;
        tracing::debug!(%key, dependency, "dependency created");
        self.dependencies.insert(key, record);
        Ok(())
    }

    /// Sets the descriptor of the cached dependency `key`.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::NotCached`] or [`ReconcileError::MissingRemoteId`]
    /// before any call is made; otherwise the client's failure.
    pub fn update_dependency(
        &mut self,
        key: &RelationshipKey,
        dependency: &str,
    ) -> Result<(), ReconcileError> {
        let remote_id = self.cached_dependency_id(key)?;
        self.client.update_dependency(&remote_id, dependency)?;
        tracing::debug!(%key, %remote_id, dependency, "dependency updated");
        if let Some(record) = self.dependencies.get_mut(key) {
            record.dependency = dependency.to_string();
        }
        Ok(())
    }

    /// Deletes the cached dependency `key`.
    ///
    /// # Errors
    ///
    /// Same as [`Reconciler::update_dependency`].
    pub fn delete_dependency(&mut self, key: &RelationshipKey) -> Result<(), ReconcileError> {
        let remote_id = self.cached_dependency_id(key)?;
        self.client.delete_dependency(&remote_id)?;
        tracing::debug!(%key, %remote_id, "dependency deleted");
        self.dependencies.remove(key);
        Ok(())
    }

    /// Links `left` and `right`.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::AlreadyCached`] if the key exists; otherwise the
    /// client's failure.
    pub fn link_asset(&mut self, left: &str, right: &str) -> Result<(), ReconcileError> {
        let key = RelationshipKey::link(left, right);
        if self.links.contains(&key) {
            return Err(ReconcileError::AlreadyCached { key });
        }

        self.client.link_asset(left, right)?;
        tracing::debug!(%key, "assets linked");
        self.links.insert(
            key,
            LinkRecord { remote_id: None, left_urn: asset_urn(left), right_urn: asset_urn(right) },
        );
        Ok(())
    }

    /// Unlinks `left` and `right`.
    ///
    /// Permitted whether or not the link is cached. With `remove_both_sides`
    /// the reverse key is dropped from the cache too.
    ///
    /// # Errors
    ///
    /// Returns the client's failure.
    pub fn unlink_asset(&mut self, left: &str, right: &str) -> Result<(), ReconcileError> {
        self.client.unlink_asset(left, right, self.remove_both_sides)?;
        let key = RelationshipKey::link(left, right);
        tracing::debug!(%key, remove_both_sides = self.remove_both_sides, "assets unlinked");
        self.links.remove(&key);
        if self.remove_both_sides {
            self.links.remove(&RelationshipKey::link(right, left));
        }
        Ok(())
    }

    /// Brings one desired dependency in line with the cache.
    ///
    /// # Errors
    ///
    /// Returns the failure of the create or update it issues.
    pub fn reconcile_dependency(
        &mut self,
        desired: &DesiredDependency,
    ) -> Result<SyncAction, ReconcileError> {
        let action = decide_dependency(desired, &self.dependencies);
        match &action {
            SyncAction::CreateDependency { dependency, .. } => {
                self.add_dependency(&desired.left, &desired.right, dependency)?;
            }
            SyncAction::UpdateDependency { key, to, .. } => self.update_dependency(key, to)?,
            _ => {}
        }
        self.applied.push(action.clone());
        Ok(action)
    }

    /// Brings one desired link in line with the cache.
    ///
    /// # Errors
    ///
    /// Returns the failure of the link it issues.
    pub fn reconcile_link(&mut self, desired: &DesiredLink) -> Result<SyncAction, ReconcileError> {
        let action = decide_link(desired, &self.links);
        if matches!(action, SyncAction::Link { .. }) {
            self.link_asset(&desired.left, &desired.right)?;
        }
        self.applied.push(action.clone());
        Ok(action)
    }

    /// Reconciles every desired dependency in order, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub fn reconcile_dependencies(
        &mut self,
        desired: &[DesiredDependency],
    ) -> Result<(), ReconcileError> {
        for dependency in desired {
            self.reconcile_dependency(dependency)?;
        }
        Ok(())
    }

    /// Reconciles every desired link in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub fn reconcile_links(&mut self, desired: &[DesiredLink]) -> Result<(), ReconcileError> {
        for link in desired {
            self.reconcile_link(link)?;
        }
        Ok(())
    }

    /// Deletes cached dependencies that `desired` does not mention.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub fn prune_dependencies(&mut self, desired: &[DesiredDependency]) -> Result<(), ReconcileError> {
        for key in dependency_removals(desired, &self.dependencies) {
            let remote_id = self.dependencies.get(&key).and_then(|r| r.remote_id.clone());
            self.delete_dependency(&key)?;
            self.applied.push(SyncAction::DeleteDependency { key, remote_id });
        }
        Ok(())
    }

    /// Unlinks cached links that `desired` does not mention in either
    /// direction.
    ///
    /// A reverse key already dropped by a two-sided unlink is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub fn prune_links(&mut self, desired: &[DesiredLink]) -> Result<(), ReconcileError> {
        for key in link_removals(desired, &self.links) {
            let Some(record) = self.links.get(&key) else {
                continue;
            };
            let (left, right) = match classify_link(record) {
                LinkVerdict::Accept { left, right } => (left.to_string(), right.to_string()),
                LinkVerdict::Reject(reason) => {
                    tracing::warn!(%key, %reason, "cached link is not asset-to-asset; skipped");
                    continue;
                }
            };
            self.unlink_asset(&left, &right)?;
            self.applied.push(SyncAction::Unlink { key });
        }
        Ok(())
    }

    /// Converges dependencies then links, optionally pruning what
    /// `desired` does not mention.
    ///
    /// # Errors
    ///
    /// Returns the first failure; [`Reconciler::applied`] still lists what
    /// completed before it.
    pub fn apply(&mut self, desired: &DesiredState, prune: bool) -> Result<(), ReconcileError> {
        self.reconcile_dependencies(&desired.dependencies)?;
        self.reconcile_links(&desired.links)?;
        if prune {
            self.prune_dependencies(&desired.dependencies)?;
            self.prune_links(&desired.links)?;
        }
        Ok(())
    }

    fn cached_dependency_id(&self, key: &RelationshipKey) -> Result<String, ReconcileError> {
        let record = self
            .dependencies
            .get(key)
            .ok_or_else(|| ReconcileError::NotCached { key: key.clone() })?;
        record.remote_id.clone().ok_or_else(|| ReconcileError::MissingRemoteId { key: key.clone() })
    }
}
