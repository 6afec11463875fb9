//! Paging protocol shared by both cache builders.

use crate::client::RelationshipClient;
use crate::error::RpcError;
use crate::ports::ProgressReporter;
use crate::relation::RemoteRelation;

/// Offsets requested for `total` records: `0, P, 2P, …` while `offset <= total`.
///
/// The boundary is inclusive, so when `total` is a multiple of the page size
/// the last request lands exactly on `total` and returns an empty page.
pub fn page_offsets(total: u64, page_size: u64) -> impl Iterator<Item = u64> {
    let step = usize::try_from(page_size.max(1)).unwrap_or(usize::MAX);
    (0..=total).step_by(step)
}

/// Fetches every page of `R` and hands each record to `sink`.
///
/// Progress is reported after each page. The first failure stops the loop;
/// records already handed to `sink` stay wherever the sink put them.
pub(crate) fn for_each_record<R: RemoteRelation>(
    client: &mut RelationshipClient<'_>,
    progress: &dyn ProgressReporter,
    total: u64,
    page_size: u64,
    mut sink: impl FnMut(R),
) -> Result<(), RpcError> {
    progress.start(R::KIND.noun(), total);
    for offset in page_offsets(total, page_size) {
        let page = match client.fetch_page::<R>(offset, page_size) {
            Ok(page) => page,
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        };
        tracing::trace!(offset, rows = page.len(), "page received");
        page.into_iter().for_each(&mut sink);
        progress.update(offset.saturating_add(page_size).min(total));
    }
    progress.finish();
    Ok(())
}
