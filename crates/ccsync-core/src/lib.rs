// ccsync-core: Sync workflows between the controller and the repositories.
//
// The API crate knows how to talk to each side; this crate decides what
// to move where. Config structs are built by the binary and handed in.

pub mod annotate;
pub mod config;
pub mod connect;
pub mod convert;
pub mod error;
pub mod model;
pub mod state_file;
pub mod state_snapshot;
pub mod template_sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use ccsync_api::controller::TaskPolicy;
pub use config::{ControllerConfig, RepoConfig, SyncConfig, TemplateDefaults, TlsVerification};
pub use error::CoreError;
pub use model::{
    DeviceRecord, NetworkSettingsRecord, SiteRecord, StateFile, TemplateOutcome,
};
pub use state_snapshot::{StateSnapshotReport, run_state_snapshot};
pub use template_sync::{TemplateSyncReport, run_template_sync};
