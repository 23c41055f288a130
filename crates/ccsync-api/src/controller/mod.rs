// Catalyst Center Intent API client
//
// Token auth, template programmer, task polling, inventory, and sites.
// `client.rs` owns the transport; endpoint groups are inherent methods
// in the sibling files.

mod auth;
mod client;
mod inventory;
pub mod models;
mod sites;
mod task;
mod templates;

pub use client::ControllerClient;
pub use inventory::DEVICE_PAGE_LIMIT;
pub use models::{
    FabricRoles, NetworkDevice, Project, SiteResponse, TaskHandle, TaskStatus, TemplateSpec,
    TemplateSummary,
};
pub use task::TaskPolicy;
