//! Command dispatch.
//!
//! `check` never opens a connection; the sync commands authenticate once
//! and share both clients when run together.

mod check;
mod network_state;
mod templates;

use ccsync_core::SyncConfig;
use ccsync_core::connect::{connect_controller, repo_client};

use crate::cli::Command;
use crate::error::CliError;

pub async fn dispatch(cmd: Command, config: &SyncConfig) -> Result<(), CliError> {
    if cmd == Command::Check {
        check::handle(config);
        return Ok(());
    }

    let controller = connect_controller(&config.controller).await?;
    let repo = repo_client(&config.repo)?;

    if cmd.syncs_templates() {
        templates::handle(config, &controller, &repo).await?;
    }
    if cmd.snapshots_state() {
        network_state::handle(config, &controller, &repo).await?;
    }
    Ok(())
}
