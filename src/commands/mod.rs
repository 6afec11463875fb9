//! Command dispatch and handlers.
//!
//! Adapters are chosen per command from the environment: `RELSYNC_REPLAY`
//! serves calls from a cassette, `RELSYNC_RECORD` records live calls to one.

pub mod cache;
pub mod sync;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Cache { config } => cache::run(config),
        Command::Sync { config, desired, dry_run, prune, json } => sync::run(
            config,
            desired,
            sync::SyncOptions { dry_run: *dry_run, prune: *prune, json: *json },
        ),
    }
}
