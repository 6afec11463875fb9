//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `relsync`.
#[derive(Debug, Parser)]
#[command(name = "relsync", version, about = "Reconcile asset dependencies and links")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the dependency and link caches and print their sizes.
    Cache {
        /// Path to the YAML config file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Converge remote relationships toward a desired state.
    Sync {
        /// Path to the YAML config file.
        #[arg(long)]
        config: PathBuf,
        /// Path to the desired-state YAML file.
        #[arg(long)]
        desired: PathBuf,
        /// Log intended mutations without sending them.
        #[arg(long)]
        dry_run: bool,
        /// Also remove relationships absent from the desired state.
        #[arg(long)]
        prune: bool,
        /// Print the action list as JSON.
        #[arg(long)]
        json: bool,
    },
}
