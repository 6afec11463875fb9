//! `relsync cache` command.

use std::path::Path;

use crate::cache::{cache_asset_dependencies, cache_asset_links, AssetDependencyCache, AssetLinkCache};
use crate::client::{DryRunPolicy, RelationshipClient};
use crate::config::SyncConfig;
use crate::context::ServiceContext;

/// Execute the `cache` command.
///
/// # Errors
///
/// Returns an error string if the config cannot be loaded or either cache
/// build fails.
pub fn run(config_path: &Path) -> Result<(), String> {
    let config = SyncConfig::load(config_path).map_err(|e| e.to_string())?;
    let ctx = ServiceContext::for_config(&config)?;
    println!("{}", run_with_context(&ctx, &config)?);
    Ok(())
}

/// Builds both caches through `ctx` and returns the summary line.
///
/// # Errors
///
/// Returns an error string if either cache build fails.
pub fn run_with_context(ctx: &ServiceContext, config: &SyncConfig) -> Result<String, String> {
    let mut client = RelationshipClient::new(ctx.rpc.as_ref(), DryRunPolicy::execute());
    let (dependencies, links) = build_caches(ctx, &mut client, config.page_size)?;
    Ok(format!(
        "Cached {} asset dependencies and {} asset links.",
        dependencies.len(),
        links.len()
    ))
}

/// Builds the dependency cache, then the link cache.
///
/// # Errors
///
/// Returns an error string naming the cache that failed.
pub fn build_caches(
    ctx: &ServiceContext,
    client: &mut RelationshipClient<'_>,
    page_size: u64,
) -> Result<(AssetDependencyCache, AssetLinkCache), String> {
    let dependencies = cache_asset_dependencies(client, ctx.progress.as_ref(), page_size)
        .map_err(|e| format!("Failed to cache asset dependencies: {e}"))?;
    let links = cache_asset_links(client, ctx.progress.as_ref(), page_size)
        .map_err(|e| format!("Failed to cache asset links: {e}"))?;
    Ok((dependencies, links))
}
