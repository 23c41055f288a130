use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub site_name_hierarchy: String,
    pub site_id: String,
}

/// Settings attached to one site, payload kept as the controller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettingsRecord {
    pub site_name_hierarchy: String,
    pub network_settings: serde_json::Value,
}

/// Sort ascending by name hierarchy (plain string comparison).
pub fn sort_sites(sites: &mut [SiteRecord]) {
    sites.sort_by(|a, b| a.site_name_hierarchy.cmp(&b.site_name_hierarchy));
}
