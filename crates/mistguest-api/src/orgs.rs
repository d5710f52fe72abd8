// Organization-scoped endpoints
//
// Everything the site resolver needs lives under `/orgs/{org_id}/`, so
// eligibility can be computed without probing each site individually.

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{MistSite, MistSiteGroup, MistTemplate, MistWlan};

impl MistClient {
    /// List every site in the organization.
    ///
    /// `GET /api/v1/orgs/{org_id}/sites` (paginated)
    pub async fn list_org_sites(&self, org_id: &str) -> Result<Vec<MistSite>, Error> {
        debug!(org_id, "listing org sites");
        self.get_all(&format!("orgs/{org_id}/sites"), &[]).await
    }

    /// List org-level WLAN definitions, including template WLANs.
    ///
    /// `GET /api/v1/orgs/{org_id}/wlans` (paginated)
    pub async fn list_org_wlans(&self, org_id: &str) -> Result<Vec<MistWlan>, Error> {
        debug!(org_id, "listing org wlans");
        self.get_all(&format!("orgs/{org_id}/wlans"), &[]).await
    }

    /// Fetch a configuration template.
    ///
    /// `GET /api/v1/orgs/{org_id}/templates/{template_id}`
    pub async fn get_org_template(
        &self,
        org_id: &str,
        template_id: &str,
    ) -> Result<MistTemplate, Error> {
        debug!(org_id, template_id, "fetching template");
        self.get(&format!("orgs/{org_id}/templates/{template_id}"))
            .await
    }

    /// Fetch a site group and its member site ids.
    ///
    /// `GET /api/v1/orgs/{org_id}/sitegroups/{sitegroup_id}`
    pub async fn get_org_sitegroup(
        &self,
        org_id: &str,
        sitegroup_id: &str,
    ) -> Result<MistSiteGroup, Error> {
        debug!(org_id, sitegroup_id, "fetching site group");
        self.get(&format!("orgs/{org_id}/sitegroups/{sitegroup_id}"))
            .await
    }
}
