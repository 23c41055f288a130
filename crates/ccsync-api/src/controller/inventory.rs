// Device inventory endpoints

use tracing::debug;

use crate::controller::client::ControllerClient;
use crate::controller::models::{DeviceDetail, FabricRoleResponse, FabricRoles, NetworkDevice};
use crate::error::Error;

/// Largest page the network-device endpoint accepts.
pub const DEVICE_PAGE_LIMIT: u32 = 500;

impl ControllerClient {
    /// Number of managed devices.
    ///
    /// `GET /dna/intent/api/v1/network-device/count`
    pub async fn device_count(&self) -> Result<u32, Error> {
        self.get("dna/intent/api/v1/network-device/count", &[])
            .await
    }

    /// One page of devices. `offset` is 1-based.
    ///
    /// `GET /dna/intent/api/v1/network-device?offset=&limit=`
    pub async fn list_devices(&self, offset: u32, limit: u32) -> Result<Vec<NetworkDevice>, Error> {
        let offset = offset.to_string();
        let limit = limit.to_string();
        self.get(
            "dna/intent/api/v1/network-device",
            &[("offset", offset.as_str()), ("limit", limit.as_str())],
        )
        .await
    }

    /// Every device, paging until the offset passes `device_count()`.
    pub async fn list_all_devices(&self) -> Result<Vec<NetworkDevice>, Error> {
        let total = self.device_count().await?;
        let mut devices = Vec::new();
        let mut offset = 1;
        while offset <= total {
            let page = self.list_devices(offset, DEVICE_PAGE_LIMIT).await?;
            debug!(offset, received = page.len(), "device page");
            devices.extend(page);
            offset += DEVICE_PAGE_LIMIT;
        }
        Ok(devices)
    }

    /// Site path the device is assigned to, if any.
    ///
    /// `GET /dna/intent/api/v1/network-device-detail?identifier=uuid&searchBy={id}`
    pub async fn device_detail(&self, device_id: &str) -> Result<Option<String>, Error> {
        let detail: DeviceDetail = self
            .get(
                "dna/intent/api/v1/network-device-detail",
                &[("identifier", "uuid"), ("searchBy", device_id)],
            )
            .await?;
        Ok(detail.location)
    }

    /// SDA fabric roles of the device at `management_ip`.
    ///
    /// `GET /dna/intent/api/v1/business/sda/device/role?deviceManagementIpAddress=`
    ///
    /// The controller answers with an error status for devices outside any
    /// fabric, so API errors become [`FabricRoles::Unavailable`]. Auth and
    /// transport failures are still returned as errors.
    pub async fn device_fabric_roles(&self, management_ip: &str) -> Result<FabricRoles, Error> {
        let result: Result<FabricRoleResponse, Error> = self
            .get_raw(
                "dna/intent/api/v1/business/sda/device/role",
                &[("deviceManagementIpAddress", management_ip)],
            )
            .await;

        match result {
            Ok(resp) => Ok(match resp.roles {
                Some(roles) if !roles.is_empty() => FabricRoles::Member(roles),
                _ => FabricRoles::NotInFabric,
            }),
            Err(Error::Api { status, message }) => {
                debug!(management_ip, status, %message, "fabric role lookup rejected");
                Ok(FabricRoles::Unavailable(message))
            }
            Err(e) => Err(e),
        }
    }
}
