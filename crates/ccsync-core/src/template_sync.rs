// ── Template sync ──
//
// Repository files become controller templates. Each file is annotated
// with its latest commit, compared by whole content against what the
// controller stores, and created, updated, or left alone. Every create or
// update is followed by exactly one version commit.

use std::fs;
use std::path::PathBuf;

use ccsync_api::controller::{Project, TemplateSpec};
use ccsync_api::repo::CommitInfo;
use ccsync_api::{ControllerClient, RepoClient};
use tracing::{debug, info, warn};

use crate::annotate;
use crate::config::{SyncConfig, TemplateDefaults};
use crate::error::CoreError;
use crate::model::{RepoFile, TemplateOutcome};
use crate::state_file;

/// Why a run ended before touching the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    RepoNotFound,
    RepoEmpty,
}

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResult {
    pub file_name: String,
    pub template_name: String,
    pub outcome: TemplateOutcome,
    /// Where the annotated content was written.
    pub local_path: PathBuf,
}

/// Outcome of one template sync run.
///
/// Only logged; unlike the state snapshot no report file is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSyncReport {
    pub skipped: Option<SkipReason>,
    pub project_created: bool,
    pub results: Vec<TemplateResult>,
    /// Human-readable lines in the order they happened.
    pub lines: Vec<String>,
}

impl TemplateSyncReport {
    fn push_line(&mut self, line: String) {
        info!("{line}");
        self.lines.push(line);
    }

    /// Results with the given outcome.
    pub fn count(&self, outcome: TemplateOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Sync every top-level file of the templates repository into the
/// configured controller project.
///
/// A missing or empty repository ends the run early with `skipped` set.
/// Any other failure aborts the run; templates handled before the failure
/// stay as written.
pub async fn run_template_sync(
    config: &SyncConfig,
    controller: &ControllerClient,
    repo: &RepoClient,
) -> Result<TemplateSyncReport, CoreError> {
    let owner = config.repo.owner.as_str();
    let repo_name = config.repo.templates_repo.as_str();
    let mut report = TemplateSyncReport::default();

    let repos = repo.list_repos(owner).await?;
    if !repos.iter().any(|r| r == repo_name) {
        info!(owner, repo = repo_name, "templates repository not found, nothing to sync");
        report.skipped = Some(SkipReason::RepoNotFound);
        return Ok(report);
    }

    let files = repo.list_files(owner, repo_name).await?;
    if files.is_empty() {
        info!(owner, repo = repo_name, "templates repository is empty, nothing to sync");
        report.skipped = Some(SkipReason::RepoEmpty);
        return Ok(report);
    }
    info!(count = files.len(), ?files, "template files found");

    let commits = collect_commits(repo, owner, repo_name).await?;
    let mut project = ensure_project(config, controller, &mut report).await?;
    state_file::ensure_dir(&config.templates_dir)?;

    for file_name in files {
        let content = repo.get_file_content(owner, repo_name, &file_name).await?;
        let file = RepoFile {
            name: file_name,
            content,
        };
        let result = sync_file(config, controller, &mut project, &commits, &file).await?;
        report.push_line(result.outcome.report_line(&result.template_name));
        report.results.push(result);
    }

    Ok(report)
}

/// Metadata for every commit, most recent first.
async fn collect_commits(
    repo: &RepoClient,
    owner: &str,
    repo_name: &str,
) -> Result<Vec<CommitInfo>, CoreError> {
    let ids = repo.list_commit_ids(owner, repo_name).await?;
    let mut commits = Vec::with_capacity(ids.len());
    for id in &ids {
        commits.push(repo.get_commit_info(owner, repo_name, id).await?);
    }
    debug!(count = commits.len(), "commit metadata collected");
    Ok(commits)
}

async fn ensure_project(
    config: &SyncConfig,
    controller: &ControllerClient,
    report: &mut TemplateSyncReport,
) -> Result<Project, CoreError> {
    let name = &config.controller.project;
    if let Some(project) = controller.find_project(name).await? {
        debug!(project = %name, id = %project.id, templates = project.templates.len(), "project found");
        return Ok(project);
    }

    let task = controller.create_project(name).await?;
    controller.wait_for_task(&task, &config.task_policy).await?;
    let project = reload_project(config, controller).await?;
    report.project_created = true;
    report.push_line(format!("Project \"{name}\" not found, created"));
    Ok(project)
}

async fn reload_project(config: &SyncConfig, controller: &ControllerClient) -> Result<Project, CoreError> {
    let name = &config.controller.project;
    controller
        .find_project(name)
        .await?
        .ok_or_else(|| CoreError::NotVisible {
            kind: "project",
            name: name.clone(),
        })
}

fn template_spec(defaults: &TemplateDefaults, name: &str, content: &str, description: &str) -> TemplateSpec {
    TemplateSpec {
        name: name.to_owned(),
        content: content.to_owned(),
        language: defaults.language.clone(),
        device_types: defaults.device_types.clone(),
        software_type: defaults.software_type.clone(),
        author: defaults.author.clone(),
        description: description.to_owned(),
    }
}

async fn sync_file(
    config: &SyncConfig,
    controller: &ControllerClient,
    project: &mut Project,
    commits: &[CommitInfo],
    file: &RepoFile,
) -> Result<TemplateResult, CoreError> {
    let name = file.template_name().to_owned();
    let defaults = &config.templates;
    let policy = &config.task_policy;

    let commit = annotate::latest_commit_for(commits, &file.name);
    if commit.is_none() {
        debug!(file = %file.name, "no commit names this file first, header without commit block");
    }
    let content = annotate::compose(commit, &file.content);

    let existing_id = project.find_template(&name).map(|t| t.id.clone());
    let outcome = match existing_id {
        None => {
            let spec = template_spec(defaults, &name, &content, &defaults.create_description);
            let task = controller.create_template(&project.id, &spec).await?;
            controller.wait_for_task(&task, policy).await?;

            *project = reload_project(config, controller).await?;
            let id = project
                .find_template(&name)
                .map(|t| t.id.clone())
                .ok_or_else(|| CoreError::NotVisible {
                    kind: "template",
                    name: name.clone(),
                })?;
            controller.commit_template(&id, &defaults.commit_comment).await?;
            TemplateOutcome::Created
        }
        Some(id) => match controller.get_template_content(&project.id, &name).await? {
            Some(stored) if stored == content => TemplateOutcome::Unchanged,
            Some(_) => {
                let spec = template_spec(defaults, &name, &content, &defaults.update_description);
                let task = controller.update_template(&id, &project.id, &spec).await?;
                controller.wait_for_task(&task, policy).await?;
                controller.commit_template(&id, &defaults.commit_comment).await?;
                TemplateOutcome::Updated
            }
            None => {
                warn!(template = %name, id = %id, "template listed but its content is unavailable");
                TemplateOutcome::ContentUnavailable
            }
        },
    };

    let local_path = config.templates_dir.join(&file.name);
    fs::write(&local_path, &content).map_err(|e| CoreError::io(&local_path, e))?;

    Ok(TemplateResult {
        file_name: file.name.clone(),
        template_name: name,
        outcome,
        local_path,
    })
}
