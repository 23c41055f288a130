// ── Network state snapshot ──
//
// Controller inventory, site hierarchy, and network settings become JSON
// files in the state directory, and every file in that directory is pushed
// to the private state repository. The run report lands next to them but
// is only pushed by the following run.

use std::fs;
use std::path::PathBuf;

use ccsync_api::controller::{FabricRoles, NetworkDevice};
use ccsync_api::{ControllerClient, RepoClient};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::site::sort_sites;
use crate::model::{DeviceRecord, NetworkSettingsRecord, SiteRecord, StateFile};
use crate::state_file::{
    self, AP_INVENTORY_FILE, DEVICE_INVENTORY_FILE, NETWORK_SETTINGS_FILE, REPORT_FILE,
    SITE_HIERARCHY_FILE,
};

/// Name hierarchy of the root site.
const GLOBAL_SITE: &str = "Global";

/// One file pushed to the state repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub file_name: String,
    /// Whether the push updated an existing file rather than creating it.
    pub existed: bool,
}

impl PushResult {
    /// Entry for `report.json`: four-space indent, `True`/`False` flag.
    pub fn report_line(&self) -> String {
        let existed = if self.existed { "True" } else { "False" };
        format!(
            "    GitHub push for file: {}, file existing: {existed}",
            self.file_name
        )
    }
}

/// Outcome of one snapshot run.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshotReport {
    pub device_count: usize,
    pub ap_count: usize,
    pub site_count: usize,
    pub global_site_id: Option<String>,
    /// JSON files generated by this run.
    pub written: Vec<StateFile>,
    /// `false` when the state repository was not among the private repos.
    pub repo_found: bool,
    pub pushed: Vec<PushResult>,
    pub lines: Vec<String>,
    /// Set once the report file has been written.
    pub report_file: Option<PathBuf>,
}

/// Snapshot the controller into `state_dir` and push the directory.
///
/// A missing state repository ends the run after the local files are
/// written, without an error and without a report file.
pub async fn run_state_snapshot(
    config: &SyncConfig,
    controller: &ControllerClient,
    repo: &RepoClient,
) -> Result<StateSnapshotReport, CoreError> {
    let dir = config.state_dir.as_path();
    state_file::ensure_dir(dir)?;
    if state_file::remove_stale(&dir.join(REPORT_FILE))? {
        debug!(dir = %dir.display(), "removed stale report");
    }

    let mut report = StateSnapshotReport::default();

    // ── Inventory ────────────────────────────────────────────────────
    let devices = controller.list_all_devices().await?;
    info!(count = devices.len(), "devices in inventory");
    let (primary, access_points) = convert::split_inventory(devices);
    let primary = resolve_devices(controller, primary).await?;
    let access_points = resolve_devices(controller, access_points).await?;
    report.device_count = primary.len();
    report.ap_count = access_points.len();
    report
        .written
        .push(state_file::write_json(dir, DEVICE_INVENTORY_FILE, &primary)?);
    report
        .written
        .push(state_file::write_json(dir, AP_INVENTORY_FILE, &access_points)?);

    // ── Sites ────────────────────────────────────────────────────────
    let site_count = controller.site_count().await?;
    info!(site_count, "sites on controller");
    report.global_site_id = controller.site_by_name(GLOBAL_SITE).await?.map(|s| s.id);
    info!(id = ?report.global_site_id, "global site");

    let mut sites: Vec<SiteRecord> = controller
        .list_sites()
        .await?
        .into_iter()
        .map(SiteRecord::from)
        .collect();
    sort_sites(&mut sites);
    report.site_count = sites.len();
    report
        .written
        .push(state_file::write_json(dir, SITE_HIERARCHY_FILE, &sites)?);

    let mut settings = Vec::with_capacity(sites.len());
    for site in &sites {
        let payload = controller.network_settings(&site.site_id).await?;
        settings.push(NetworkSettingsRecord {
            site_name_hierarchy: site.site_name_hierarchy.clone(),
            network_settings: payload,
        });
    }
    report
        .written
        .push(state_file::write_json(dir, NETWORK_SETTINGS_FILE, &settings)?);

    // ── Push ─────────────────────────────────────────────────────────
    let owner = config.repo.owner.as_str();
    let state_repo = config.repo.state_repo.as_str();
    let private = repo.list_private_repos().await?;
    if !private.iter().any(|r| r == state_repo) {
        info!(repo = state_repo, "state repository not found among private repositories, skipping push");
        return Ok(report);
    }
    report.repo_found = true;

    for path in state_file::list_regular_files(dir)? {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let existed = repo.probe_file(owner, state_repo, &file_name).await?.is_found();
        let content = fs::read_to_string(&path).map_err(|e| CoreError::io(&path, e))?;
        repo.push_file(
            owner,
            state_repo,
            &file_name,
            &config.state_commit_message,
            &content,
            existed,
        )
        .await?;

        let pushed = PushResult { file_name, existed };
        let line = pushed.report_line();
        info!("{}", line.trim_start());
        report.lines.push(line);
        report.pushed.push(pushed);
    }

    let written = state_file::write_json(dir, REPORT_FILE, &report.lines)?;
    report.report_file = Some(written.path);
    Ok(report)
}

/// Resolve site path and fabric roles for each device.
async fn resolve_devices(
    controller: &ControllerClient,
    devices: Vec<NetworkDevice>,
) -> Result<Vec<DeviceRecord>, CoreError> {
    let mut records = Vec::with_capacity(devices.len());
    for device in devices {
        let site = controller.device_detail(&device.id).await?;
        let roles = match controller
            .device_fabric_roles(&device.management_ip_address)
            .await?
        {
            FabricRoles::Unavailable(reason) => {
                warn!(
                    device = %device.id,
                    ip = %device.management_ip_address,
                    %reason,
                    "fabric role lookup failed, recording no roles"
                );
                Vec::new()
            }
            roles => roles.into_roles(),
        };
        records.push(convert::device_record(device, site, roles));
    }
    Ok(records)
}
