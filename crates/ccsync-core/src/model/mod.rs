// ── Domain model ──
//
// Records written to the state repository and the per-file outcomes of a
// template sync. Controller-side template and project shapes come straight
// from `ccsync_api`.

pub mod device;
pub mod site;
pub mod state;
pub mod template;

pub use ccsync_api::controller::{Project, TemplateSpec};
pub use ccsync_api::repo::CommitInfo;

pub use device::DeviceRecord;
pub use site::{NetworkSettingsRecord, SiteRecord};
pub use state::StateFile;
pub use template::{RepoFile, TemplateOutcome, template_name};
