//! Builds the asset link cache.

use super::paging::for_each_record;
use super::AssetLinkCache;
use crate::client::RelationshipClient;
use crate::error::RpcError;
use crate::ports::ProgressReporter;
use crate::relation::{classify_link, LinkRecord, LinkVerdict, RelationshipKey, RelationshipKind};

/// Retrieves every asset-to-asset link into a fresh cache.
///
/// # Errors
///
/// Returns the first count or paging failure.
pub fn cache_asset_links(
    client: &mut RelationshipClient<'_>,
    progress: &dyn ProgressReporter,
    page_size: u64,
) -> Result<AssetLinkCache, RpcError> {
    let mut cache = AssetLinkCache::new();
    populate_asset_links(&mut cache, client, progress, page_size)?;
    Ok(cache)
}

/// Clears `cache` and refills it from the instance.
///
/// Links whose endpoints are not both assets are dropped. Returns the
/// number of cached links; on failure `cache` keeps earlier pages.
///
/// # Errors
///
/// Returns the first count or paging failure.
pub fn populate_asset_links(
    cache: &mut AssetLinkCache,
    client: &mut RelationshipClient<'_>,
    progress: &dyn ProgressReporter,
    page_size: u64,
) -> Result<usize, RpcError> {
    cache.clear();

    let total = client.count(RelationshipKind::Link)?;
    if total == 0 {
        tracing::info!("No existing asset links could be found");
        return Ok(0);
    }

    tracing::info!("Retrieving {total} asset entity links. Please wait...");
    for_each_record::<LinkRecord>(client, progress, total, page_size, |record| {
        let key = match classify_link(&record) {
            LinkVerdict::Accept { left, right } => RelationshipKey::link(left, right),
            LinkVerdict::Reject(reason) => {
                tracing::trace!(left = %record.left_urn, right = %record.right_urn, %reason, "link skipped");
                return;
            }
        };
        if let Some(previous) = cache.insert(key.clone(), record) {
            tracing::debug!(%key, replaced = ?previous.remote_id, "duplicate link key");
        }
    })?;

    tracing::info!("{} asset links cached.", cache.len());
    Ok(cache.len())
}
