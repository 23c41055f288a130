// Site hierarchy and network settings endpoints

use crate::controller::client::ControllerClient;
use crate::controller::models::SiteResponse;
use crate::error::Error;

impl ControllerClient {
    /// Number of sites, `Global` included.
    ///
    /// `GET /dna/intent/api/v1/site/count`
    pub async fn site_count(&self) -> Result<u32, Error> {
        self.get("dna/intent/api/v1/site/count", &[]).await
    }

    /// Every site in one call (the endpoint is not paged here).
    ///
    /// `GET /dna/intent/api/v1/site`
    pub async fn list_sites(&self) -> Result<Vec<SiteResponse>, Error> {
        self.get("dna/intent/api/v1/site", &[]).await
    }

    /// Look up a site by its name hierarchy, e.g. `Global/US/Austin`.
    ///
    /// `GET /dna/intent/api/v1/site?name=`. A 404 means no such site.
    pub async fn site_by_name(&self, name: &str) -> Result<Option<SiteResponse>, Error> {
        match self
            .get::<Vec<SiteResponse>>("dna/intent/api/v1/site", &[("name", name)])
            .await
        {
            Ok(sites) => Ok(sites.into_iter().next()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Network settings (DHCP, DNS, NTP, AAA, ...) attached to a site.
    ///
    /// `GET /dna/intent/api/v2/network?siteId=`. The payload is kept opaque.
    pub async fn network_settings(&self, site_id: &str) -> Result<serde_json::Value, Error> {
        self.get("dna/intent/api/v2/network", &[("siteId", site_id)])
            .await
    }
}
