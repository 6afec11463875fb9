//! `relsync sync` command.

use std::path::Path;

use super::cache::build_caches;
use crate::client::{DryRunPolicy, RelationshipClient};
use crate::config::SyncConfig;
use crate::context::ServiceContext;
use crate::desired::DesiredState;
use crate::reconcile::{format_actions, Reconciler, SyncAction};

/// Flags accepted by `sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Simulate mutations; OR-ed with the config's `dry_run`.
    pub dry_run: bool,
    /// Remove relationships absent from desired state.
    pub prune: bool,
    /// Print the action list as JSON.
    pub json: bool,
}

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string if inputs cannot be loaded, a cache build fails,
/// or a mutation fails.
pub fn run(config_path: &Path, desired_path: &Path, options: SyncOptions) -> Result<(), String> {
    let config = SyncConfig::load(config_path).map_err(|e| e.to_string())?;
    let desired = DesiredState::load(desired_path)?;
    let ctx = ServiceContext::for_config(&config)?;
    println!("{}", run_with_context(&ctx, &config, &desired, options)?);
    Ok(())
}

/// Builds caches, reconciles `desired`, and returns the report.
///
/// If a mutation fails the error carries the actions completed before it.
///
/// # Errors
///
/// Returns an error string if a cache build or mutation fails.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &SyncConfig,
    desired: &DesiredState,
    options: SyncOptions,
) -> Result<String, String> {
    let dry_run = options.dry_run || config.dry_run;
    let mut client = RelationshipClient::new(ctx.rpc.as_ref(), DryRunPolicy::from_flag(dry_run));
    let (dependencies, links) = build_caches(ctx, &mut client, config.page_size)?;

    let mut reconciler = Reconciler::new(&mut client, dependencies, links, config.remove_both_sides);
    let result = reconciler.apply(desired, options.prune);
    let actions = reconciler.into_applied();

    let changed = actions.iter().filter(|a| a.is_mutation()).count();
    tracing::info!(changed, total = actions.len(), dry_run, "reconciliation finished");

    let report = render(&actions, dry_run, options.json)?;
    match result {
        Ok(()) => Ok(report),
        Err(e) => Err(format!("Sync failed: {e}\nCompleted before failure:\n{report}")),
    }
}

fn render(actions: &[SyncAction], dry_run: bool, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(actions)
            .map_err(|e| format!("Failed to serialize actions: {e}"));
    }
    let heading = if dry_run { "Dry run — would perform:" } else { "Sync complete:" };
    Ok(format!("{heading}\n{}", format_actions(actions)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::SilentProgress;
    use crate::desired::{DesiredDependency, DesiredLink};
    use crate::testing::{
        count_response, dependency_row, link_row, ok_response, rows_response, ScriptedTransport,
    };

    fn config(extra: &str) -> SyncConfig {
        SyncConfig::from_yaml(&format!("endpoint: https://example.test/xmlmc\n{extra}")).unwrap()
    }

    fn desired() -> DesiredState {
        DesiredState {
            dependencies: vec![
                DesiredDependency { left: "A".into(), right: "B".into(), dependency: "Runs On".into() },
                DesiredDependency { left: "C".into(), right: "D".into(), dependency: "Hosts".into() },
            ],
            links: vec![DesiredLink { left: "A".into(), right: "B".into() }],
        }
    }

    fn scripted_caches(transport: &ScriptedTransport) {
        transport
            .respond(count_response(1))
            .respond(rows_response(&[dependency_row("9", "A", "B", "Hosts")]))
            .respond(count_response(1))
            .respond(rows_response(&[link_row("4", "A", "B")]));
    }

    #[test]
    fn dry_run_reports_without_mutating() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));
        let options = SyncOptions { dry_run: true, ..SyncOptions::default() };

        let report = run_with_context(&ctx, &config(""), &desired(), options).unwrap();

        assert!(report.starts_with("Dry run — would perform:"));
        assert!(report.contains("UPDATE dependency A:B (id 9): Hosts -> Runs On"));
        assert!(report.contains("CREATE dependency C:D: Hosts"));
        assert!(report.contains("UNCHANGED link A:B"));
    }

    #[test]
    fn config_dry_run_also_simulates() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));

        let report =
            run_with_context(&ctx, &config("dry_run: true\n"), &desired(), SyncOptions::default())
                .unwrap();

        assert!(report.starts_with("Dry run"));
    }

    #[test]
    fn applies_and_reports_complete() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        transport.respond(ok_response()).respond(ok_response());
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));

        let report =
            run_with_context(&ctx, &config(""), &desired(), SyncOptions::default()).unwrap();

        assert!(report.starts_with("Sync complete:"));
        assert_eq!(report.lines().count(), 4);
    }

    #[test]
    fn failure_lists_completed_actions() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        transport.respond(ok_response()).fail("timeout");
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));

        let err =
            run_with_context(&ctx, &config(""), &desired(), SyncOptions::default()).unwrap_err();

        assert!(err.starts_with("Sync failed: create_dependency:Invoke:timeout"));
        assert!(err.contains("UPDATE dependency A:B"));
        assert!(!err.contains("CREATE dependency C:D"));
    }

    #[test]
    fn json_output_lists_actions() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));
        let options = SyncOptions { dry_run: true, prune: false, json: true };

        let report = run_with_context(&ctx, &config(""), &desired(), options).unwrap();

        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[1]["action"], "create_dependency");
    }

    #[test]
    fn prune_removes_unlisted_relationships() {
        let transport = ScriptedTransport::new();
        scripted_caches(&transport);
        let ctx = ServiceContext::from_parts(Box::new(transport), Box::new(SilentProgress));
        let options = SyncOptions { dry_run: true, prune: true, json: false };

        let report =
            run_with_context(&ctx, &config(""), &DesiredState::default(), options).unwrap();

        assert!(report.contains("DELETE dependency A:B (id 9)"));
        assert!(report.contains("UNLINK A:B"));
    }
}
