use serde::{Deserialize, Serialize};

/// One managed device as written to the inventory files.
///
/// Field names are part of the state repository's format; renaming them
/// turns every existing file into a full diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub hostname: Option<String>,
    pub device_ip: String,
    pub device_id: String,
    pub version: Option<String>,
    /// Platform description, e.g. `Cisco Catalyst 9300 Switch`.
    pub device_family: Option<String>,
    pub role: Option<String>,
    /// Site path, e.g. `Global/US/Austin/Floor 1`.
    pub site: Option<String>,
    /// SDA fabric roles; empty outside a fabric or when the lookup failed.
    pub sda_roles: Vec<String>,
}
