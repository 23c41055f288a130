// ── Runtime sync configuration ──
//
// These types describe where to connect and what to write. They carry
// credentials and tuning but never touch disk; `ccsync-config` builds a
// `SyncConfig` once and the workflows borrow it.

use std::path::PathBuf;
use std::time::Duration;

use ccsync_api::controller::TaskPolicy;
use ccsync_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy for the controller connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (lab controllers with self-signed certs).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Connection settings for the network controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://sandboxdnac.cisco.com`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// Template-programmer project the templates land in.
    pub project: String,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(TlsMode::from(&self.tls), self.timeout)
    }
}

/// Connection settings for the source-hosting API.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// API root, `https://api.github.com` unless GitHub Enterprise.
    pub api_url: Url,
    /// Account that owns both repositories.
    pub owner: String,
    pub token: SecretString,
    /// Repository holding the template sources.
    pub templates_repo: String,
    /// Private repository receiving the network state files.
    pub state_repo: String,
    /// Branch every push targets.
    pub branch: String,
    pub timeout: Duration,
}

impl RepoConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(TlsMode::System, self.timeout)
    }
}

/// Attributes stamped on every template the sync creates or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefaults {
    pub language: String,
    pub software_type: String,
    /// Product families the template applies to.
    pub device_types: Vec<String>,
    pub author: String,
    pub create_description: String,
    pub update_description: String,
    /// Comment recorded on each version commit.
    pub commit_comment: String,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            language: "JINJA".into(),
            software_type: "IOS-XE".into(),
            device_types: vec!["Routers".into(), "Switches and Hubs".into()],
            author: "ccsync".into(),
            create_description: "Template created by ccsync".into(),
            update_description: "Template updated by ccsync".into(),
            commit_comment: "Committed by ccsync".into(),
        }
    }
}

/// Everything one run needs.
///
/// Built by the binary, passed by reference into each workflow.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub controller: ControllerConfig,
    pub repo: RepoConfig,
    pub templates: TemplateDefaults,
    /// Local copy of every annotated template.
    pub templates_dir: PathBuf,
    /// Local output of the state snapshot; every regular file in it is pushed.
    pub state_dir: PathBuf,
    /// Commit message for state file pushes.
    pub state_commit_message: String,
    pub task_policy: TaskPolicy,
}
