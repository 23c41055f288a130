//! `ccsync network-state`

use ccsync_api::{ControllerClient, RepoClient};
use ccsync_core::{SyncConfig, run_state_snapshot};
use tracing::info;

use crate::error::CliError;

pub async fn handle(
    config: &SyncConfig,
    controller: &ControllerClient,
    repo: &RepoClient,
) -> Result<(), CliError> {
    info!(repo = %config.repo.state_repo, "network state snapshot started");
    let report = run_state_snapshot(config, controller, repo).await?;

    info!(
        devices = report.device_count,
        access_points = report.ap_count,
        sites = report.site_count,
        pushed = report.pushed.len(),
        dir = %config.state_dir.display(),
        "network state snapshot finished"
    );
    if let Some(path) = &report.report_file {
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
