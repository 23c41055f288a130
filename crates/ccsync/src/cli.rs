//! Clap derive structures for the `ccsync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ccsync -- keep Catalyst Center and GitHub in step
#[derive(Debug, Parser)]
#[command(
    name = "ccsync",
    version,
    about = "Sync Catalyst Center templates from GitHub and network state back to GitHub",
    long_about = "Pulls configuration templates from a GitHub repository into a Catalyst Center\n\
        template-programmer project, and snapshots device inventory, site hierarchy and\n\
        network settings into a private GitHub repository.\n\n\
        Credentials come from CATALYST_CENTER_* and GITHUB_* environment variables,\n\
        optionally loaded from environment.env.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TOML settings file (optional)
    #[arg(long, env = "CCSYNC_CONFIG", default_value = "ccsync.toml", global = true)]
    pub config: PathBuf,

    /// KEY=value file loaded into the environment (optional)
    #[arg(long, default_value = "environment.env", global = true)]
    pub env_file: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Push templates from the GitHub repository into the Catalyst Center project
    Templates,

    /// Snapshot network state from Catalyst Center into the GitHub state repository
    NetworkState,

    /// Run the template sync, then the network state snapshot
    All,

    /// Validate configuration and print the resolved settings
    Check,
}

impl Command {
    pub fn syncs_templates(self) -> bool {
        matches!(self, Self::Templates | Self::All)
    }

    pub fn snapshots_state(self) -> bool {
        matches!(self, Self::NetworkState | Self::All)
    }
}
