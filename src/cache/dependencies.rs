//! Builds the asset dependency cache.

use super::paging::for_each_record;
use super::AssetDependencyCache;
use crate::client::RelationshipClient;
use crate::error::RpcError;
use crate::ports::ProgressReporter;
use crate::relation::{DependencyRecord, RelationshipKind};

/// Retrieves every asset-to-asset dependency into a fresh cache.
///
/// # Errors
///
/// Returns the first count or paging failure.
pub fn cache_asset_dependencies(
    client: &mut RelationshipClient<'_>,
    progress: &dyn ProgressReporter,
    page_size: u64,
) -> Result<AssetDependencyCache, RpcError> {
    let mut cache = AssetDependencyCache::new();
    populate_asset_dependencies(&mut cache, client, progress, page_size)?;
    Ok(cache)
}

/// Clears `cache` and refills it from the instance.
///
/// Returns the number of cached dependencies. On failure `cache` keeps
/// whatever earlier pages delivered, and must be treated as incomplete.
///
/// # Errors
///
/// Returns the first count or paging failure.
pub fn populate_asset_dependencies(
    cache: &mut AssetDependencyCache,
    client: &mut RelationshipClient<'_>,
    progress: &dyn ProgressReporter,
    page_size: u64,
) -> Result<usize, RpcError> {
    cache.clear();

    let total = client.count(RelationshipKind::Dependency)?;
    if total == 0 {
        tracing::info!("No existing asset dependencies could be found");
        return Ok(0);
    }

    tracing::info!("Retrieving {total} asset dependencies. Please wait...");
    for_each_record::<DependencyRecord>(client, progress, total, page_size, |record| {
        let key = record.key();
        if let Some(previous) = cache.insert(key.clone(), record) {
            tracing::debug!(%key, replaced = ?previous.remote_id, "duplicate dependency key");
        }
    })?;

    tracing::info!("{} asset dependencies cached.", cache.len());
    Ok(cache.len())
}
