// Guest authorization endpoints
//
// Guest records exist at two scopes. Site-scoped records are the common
// case; org-scoped records back org-level WLANs and serve as the fallback
// target when a site-scoped write is rejected.

use serde::Serialize;
use tracing::debug;

use crate::client::{MistClient, WriteReceipt};
use crate::error::Error;
use crate::models::MistGuest;

/// Where a guest authorization record lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestScope<'a> {
    Site(&'a str),
    Org(&'a str),
}

impl GuestScope<'_> {
    fn guests_path(self) -> String {
        match self {
            Self::Site(id) => format!("sites/{id}/guests"),
            Self::Org(id) => format!("orgs/{id}/guests"),
        }
    }

    /// `"site"` or `"org"`, for log fields.
    pub fn label(self) -> &'static str {
        match self {
            Self::Site(_) => "site",
            Self::Org(_) => "org",
        }
    }
}

impl MistClient {
    /// List guest authorizations at a scope.
    ///
    /// `GET /api/v1/sites/{site_id}/guests[?wlan_id=]` or
    /// `GET /api/v1/orgs/{org_id}/guests` (paginated). The WLAN filter only
    /// applies to site scope.
    pub async fn list_guest_authorizations(
        &self,
        scope: GuestScope<'_>,
        wlan_id: Option<&str>,
    ) -> Result<Vec<MistGuest>, Error> {
        debug!(scope = scope.label(), ?wlan_id, "listing guest authorizations");
        let params: Vec<(&str, String)> = match (scope, wlan_id) {
            (GuestScope::Site(_), Some(wlan)) => vec![("wlan_id", wlan.to_owned())],
            _ => Vec::new(),
        };
        self.get_all(&scope.guests_path(), &params).await
    }

    /// Create or refresh a guest authorization.
    ///
    /// `PUT /api/v1/{sites|orgs}/{id}/guests/{mac}`. `mac` is the path
    /// segment as the API expects it (compact form).
    pub async fn upsert_guest_authorization<B: Serialize + Sync>(
        &self,
        scope: GuestScope<'_>,
        mac: &str,
        body: &B,
    ) -> Result<WriteReceipt, Error> {
        debug!(scope = scope.label(), mac, "upserting guest authorization");
        self.put(&format!("{}/{mac}", scope.guests_path()), body)
            .await
    }
}
