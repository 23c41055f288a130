// ── API-to-domain conversions ──
//
// Bridges `ccsync_api` controller responses into the records written to
// the state repository, and splits the inventory into devices and APs.

use ccsync_api::controller::{NetworkDevice, SiteResponse};

use crate::model::{DeviceRecord, SiteRecord};

/// Controller device family of wireless access points.
pub const ACCESS_POINT_FAMILY: &str = "Unified AP";

/// Whether the device belongs in the AP inventory.
pub fn is_access_point(device: &NetworkDevice) -> bool {
    device.family.as_deref() == Some(ACCESS_POINT_FAMILY)
}

/// Split devices into `(primary, access_points)`, keeping controller order.
pub fn split_inventory(devices: Vec<NetworkDevice>) -> (Vec<NetworkDevice>, Vec<NetworkDevice>) {
    let (access_points, primary) = devices.into_iter().partition(is_access_point);
    (primary, access_points)
}

/// Build the inventory record once site and fabric roles are resolved.
pub fn device_record(device: NetworkDevice, site: Option<String>, sda_roles: Vec<String>) -> DeviceRecord {
    DeviceRecord {
        hostname: device.hostname,
        device_ip: device.management_ip_address,
        device_id: device.id,
        version: device.software_version,
        device_family: device.device_type,
        role: device.role,
        site,
        sda_roles,
    }
}

impl From<SiteResponse> for SiteRecord {
    fn from(site: SiteResponse) -> Self {
        Self {
            site_name_hierarchy: site.site_name_hierarchy,
            site_id: site.id,
        }
    }
}
