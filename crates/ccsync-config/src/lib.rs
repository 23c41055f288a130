//! Configuration loading for ccsync.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `ccsync.toml` in the working directory (optional)
//! 3. Environment variables
//!
//! `environment.env` is read into the process environment first (existing
//! variables win), so a deployment can keep its credentials in one file.
//!
//! # Environment variable mapping
//!
//! | Variable | Key |
//! |---|---|
//! | `CATALYST_CENTER_URL`, `_USER`, `_PASS`, `_PROJECT`, `_VERIFY_TLS`, `_CA_CERT`, `_TIMEOUT_SECS` | `controller.*` |
//! | `GITHUB_USERNAME`, `_TOKEN`, `_REPO`, `_NETWORK_STATE_REPO`, `_API_URL`, `_BRANCH` | `github.*` |
//! | `CCSYNC_TEMPLATES_DIR`, `CCSYNC_TEMPLATE__AUTHOR`, `CCSYNC_TASK__MAX_ATTEMPTS`, ... | `sync.*` (`__` nests) |

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use ccsync_core::{
    ControllerConfig, RepoConfig, SyncConfig, TaskPolicy, TemplateDefaults, TlsVerification,
};

/// Optional TOML file read from the working directory.
pub const CONFIG_FILE: &str = "ccsync.toml";
/// `KEY=value` file loaded into the environment before extraction.
pub const ENV_FILE: &str = "environment.env";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{field} is not set")]
    Missing { field: &'static str },

    #[error("failed to read {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Raw config structs ──────────────────────────────────────────────

/// Everything figment extracts, before validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerSection,
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub sync: SyncSection,
}

/// `[controller]`, fed by `CATALYST_CENTER_*`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default = "default_true")]
    pub verify_tls: bool,
    /// PEM bundle to trust instead of the system store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            pass: None,
            project: None,
            verify_tls: true,
            ca_cert: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[github]`, fed by `GITHUB_*`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_state_repo: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubSection {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            repo: None,
            network_state_repo: None,
            api_url: default_api_url(),
            branch: default_branch(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[sync]`, fed by `CCSYNC_*`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSection {
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    #[serde(default = "default_state_commit_message")]
    pub state_commit_message: String,
    #[serde(default)]
    pub template: TemplateSection,
    #[serde(default)]
    pub task: TaskSection,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            state_dir: default_state_dir(),
            state_commit_message: default_state_commit_message(),
            template: TemplateSection::default(),
            task: TaskSection::default(),
        }
    }
}

/// `[sync.template]`: attributes of created and updated templates.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplateSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_types: Option<Vec<String>>,
}

/// `[sync.task]`: polling of asynchronous controller tasks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskSection {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed wait when the controller returns no task id.
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: default_max_attempts(),
            settle_delay_secs: default_settle_delay_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_url() -> String {
    "https://api.github.com".into()
}

fn default_branch() -> String {
    "main".into()
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("network_state")
}

fn default_state_commit_message() -> String {
    "Network state sync by ccsync".into()
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

fn default_max_attempts() -> u32 {
    10
}

fn default_settle_delay_secs() -> u64 {
    10
}

// ── Loading ─────────────────────────────────────────────────────────

/// Variables that always hold text, with their config keys.
///
/// `Env` parses values, so `CATALYST_CENTER_PASS=007123` would arrive as
/// the integer 7123. These are re-read verbatim and merged over it.
const STRING_VARS: &[(&str, &str)] = &[
    ("CATALYST_CENTER_URL", "controller.url"),
    ("CATALYST_CENTER_USER", "controller.user"),
    ("CATALYST_CENTER_PASS", "controller.pass"),
    ("CATALYST_CENTER_PROJECT", "controller.project"),
    ("CATALYST_CENTER_CA_CERT", "controller.ca_cert"),
    ("GITHUB_USERNAME", "github.username"),
    ("GITHUB_TOKEN", "github.token"),
    ("GITHUB_REPO", "github.repo"),
    ("GITHUB_NETWORK_STATE_REPO", "github.network_state_repo"),
    ("GITHUB_API_URL", "github.api_url"),
    ("GITHUB_BRANCH", "github.branch"),
    ("CCSYNC_TEMPLATES_DIR", "sync.templates_dir"),
    ("CCSYNC_STATE_DIR", "sync.state_dir"),
    ("CCSYNC_STATE_COMMIT_MESSAGE", "sync.state_commit_message"),
    ("CCSYNC_TEMPLATE__AUTHOR", "sync.template.author"),
    ("CCSYNC_TEMPLATE__CREATE_DESCRIPTION", "sync.template.create_description"),
    ("CCSYNC_TEMPLATE__UPDATE_DESCRIPTION", "sync.template.update_description"),
    ("CCSYNC_TEMPLATE__COMMIT_COMMENT", "sync.template.commit_comment"),
    ("CCSYNC_TEMPLATE__LANGUAGE", "sync.template.language"),
    ("CCSYNC_TEMPLATE__SOFTWARE_TYPE", "sync.template.software_type"),
];

impl Config {
    /// Build the provider chain with the TOML layer read from `toml_path`.
    pub fn figment_from(toml_path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if toml_path.exists() {
            debug!(path = %toml_path.display(), "merging config file");
            figment = figment.merge(Toml::file(toml_path));
        }
        figment = figment
            .merge(Env::prefixed("CATALYST_CENTER_").map(|key| format!("controller.{key}").into()))
            .merge(Env::prefixed("GITHUB_").map(|key| format!("github.{key}").into()))
            .merge(
                Env::prefixed("CCSYNC_")
                    .map(|key| format!("sync.{}", key.as_str().replace("__", ".")).into()),
            );
        for &(var, key) in STRING_VARS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// Provider chain with `ccsync.toml` from the working directory.
    pub fn figment() -> Figment {
        Self::figment_from(Path::new(CONFIG_FILE))
    }

    /// Extract without touching `environment.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Extract with the TOML layer read from `toml_path`.
    pub fn load_from(toml_path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::figment_from(toml_path).extract()?)
    }

    /// Load `environment.env` (if present), then extract.
    pub fn load_with_env_file() -> Result<Self, ConfigError> {
        load_env_file(Path::new(ENV_FILE))?;
        Self::load()
    }

    /// Validate into the runtime config.
    pub fn into_sync_config(self) -> Result<SyncConfig, ConfigError> {
        let controller = self.controller.resolve()?;
        let repo = self.github.resolve()?;
        let task_policy = self.sync.task.resolve()?;
        let templates = self.sync.template.resolve();

        Ok(SyncConfig {
            controller,
            repo,
            templates,
            templates_dir: self.sync.templates_dir,
            state_dir: self.sync.state_dir,
            state_commit_message: self.sync.state_commit_message,
            task_policy,
        })
    }
}

/// Read `KEY=value` lines from `path` into the environment.
///
/// Variables already set are kept. A missing file is not an error.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "loaded environment file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// The usual entry point: env file, TOML, environment, validation.
pub fn load_sync_config() -> Result<SyncConfig, ConfigError> {
    Config::load_with_env_file()?.into_sync_config()
}

/// Same as [`load_sync_config`] with explicit file locations.
pub fn load_sync_config_from(toml_path: &Path, env_file: &Path) -> Result<SyncConfig, ConfigError> {
    load_env_file(env_file)?;
    Config::load_from(toml_path)?.into_sync_config()
}

// ── Validation ──────────────────────────────────────────────────────

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing { field }),
    }
}

fn parse_http_url(raw: &str, field: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a valid URL: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }
    Ok(url)
}

impl ControllerSection {
    fn resolve(self) -> Result<ControllerConfig, ConfigError> {
        let url = required(self.url, "CATALYST_CENTER_URL")?;
        let url = parse_http_url(&url, "CATALYST_CENTER_URL")?;

        let tls = match (self.verify_tls, self.ca_cert) {
            (false, _) => TlsVerification::DangerAcceptInvalid,
            (true, Some(path)) => TlsVerification::CustomCa(path),
            (true, None) => TlsVerification::SystemDefaults,
        };

        Ok(ControllerConfig {
            url,
            username: required(self.user, "CATALYST_CENTER_USER")?,
            password: SecretString::from(required(self.pass, "CATALYST_CENTER_PASS")?),
            project: required(self.project, "CATALYST_CENTER_PROJECT")?,
            tls,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

impl GithubSection {
    fn resolve(self) -> Result<RepoConfig, ConfigError> {
        if self.branch.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "GITHUB_BRANCH".into(),
                reason: "branch name is empty".into(),
            });
        }
        Ok(RepoConfig {
            api_url: parse_http_url(&self.api_url, "GITHUB_API_URL")?,
            owner: required(self.username, "GITHUB_USERNAME")?,
            token: SecretString::from(required(self.token, "GITHUB_TOKEN")?),
            templates_repo: required(self.repo, "GITHUB_REPO")?,
            state_repo: required(self.network_state_repo, "GITHUB_NETWORK_STATE_REPO")?,
            branch: self.branch,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

impl TemplateSection {
    fn resolve(self) -> TemplateDefaults {
        let defaults = TemplateDefaults::default();
        TemplateDefaults {
            language: self.language.unwrap_or(defaults.language),
            software_type: self.software_type.unwrap_or(defaults.software_type),
            device_types: self.device_types.unwrap_or(defaults.device_types),
            author: self.author.unwrap_or(defaults.author),
            create_description: self.create_description.unwrap_or(defaults.create_description),
            update_description: self.update_description.unwrap_or(defaults.update_description),
            commit_comment: self.commit_comment.unwrap_or(defaults.commit_comment),
        }
    }
}

impl TaskSection {
    fn resolve(self) -> Result<TaskPolicy, ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "CCSYNC_TASK__MAX_ATTEMPTS".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(ConfigError::Validation {
                field: "CCSYNC_TASK__INITIAL_DELAY_MS".into(),
                reason: format!(
                    "{}ms exceeds max delay {}ms",
                    self.initial_delay_ms, self.max_delay_ms
                ),
            });
        }
        Ok(TaskPolicy {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            max_attempts: self.max_attempts,
            settle_delay: Duration::from_secs(self.settle_delay_secs),
        })
    }
}
