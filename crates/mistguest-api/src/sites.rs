// Site-scoped endpoints

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{MistWirelessClient, MistWlan};

impl MistClient {
    /// List WLANs derived for a site (site-level and applied template WLANs).
    ///
    /// `GET /api/v1/sites/{site_id}/wlans` (paginated)
    pub async fn list_site_wlans(&self, site_id: &str) -> Result<Vec<MistWlan>, Error> {
        debug!(site_id, "listing site wlans");
        self.get_all(&format!("sites/{site_id}/wlans"), &[]).await
    }

    /// List wireless clients currently connected at a site.
    ///
    /// `GET /api/v1/sites/{site_id}/stats/clients` (paginated)
    pub async fn list_site_wireless_clients(
        &self,
        site_id: &str,
    ) -> Result<Vec<MistWirelessClient>, Error> {
        debug!(site_id, "listing connected wireless clients");
        self.get_all(&format!("sites/{site_id}/stats/clients"), &[])
            .await
    }
}
