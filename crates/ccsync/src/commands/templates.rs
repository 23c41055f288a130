//! `ccsync templates`

use ccsync_api::{ControllerClient, RepoClient};
use ccsync_core::template_sync::SkipReason;
use ccsync_core::{SyncConfig, TemplateOutcome, run_template_sync};
use tracing::info;

use crate::error::CliError;

pub async fn handle(
    config: &SyncConfig,
    controller: &ControllerClient,
    repo: &RepoClient,
) -> Result<(), CliError> {
    info!(
        repo = %config.repo.templates_repo,
        project = %config.controller.project,
        "template sync started"
    );
    let report = run_template_sync(config, controller, repo).await?;

    match report.skipped {
        Some(SkipReason::RepoNotFound) => {
            info!(repo = %config.repo.templates_repo, "template sync skipped: repository not found");
        }
        Some(SkipReason::RepoEmpty) => {
            info!(repo = %config.repo.templates_repo, "template sync skipped: repository is empty");
        }
        None => info!(
            created = report.count(TemplateOutcome::Created),
            updated = report.count(TemplateOutcome::Updated),
            unchanged = report.count(TemplateOutcome::Unchanged),
            unavailable = report.count(TemplateOutcome::ContentUnavailable),
            dir = %config.templates_dir.display(),
            "template sync finished"
        ),
    }
    Ok(())
}
