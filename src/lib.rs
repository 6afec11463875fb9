//! Core library entry for the `relsync` CLI.
//!
//! `relsync` mirrors asset relationships in a Hornbill instance: it caches
//! the asset dependencies and asset links that exist remotely, then
//! creates, updates, or removes them to match a desired state, optionally
//! as a dry run.

pub mod adapters;
pub mod cache;
pub mod cassette;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod desired;
pub mod error;
pub mod logging;
pub mod ports;
pub mod reconcile;
pub mod relation;
pub mod xmlmc;

#[cfg(test)]
pub(crate) mod testing;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}
