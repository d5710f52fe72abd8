// Identity and organization endpoints
//
// `GET /self` and `GET /orgs/{org_id}`, plus organization-id resolution:
// a configured id wins, otherwise the first organization found in the
// token's privileges is used and cached for the client's lifetime.

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{Org, SelfInfo};

/// Organization reachable with the current credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgSummary {
    pub id: String,
    pub name: String,
}

impl MistClient {
    /// Identity and privileges of the current credential.
    ///
    /// `GET /api/v1/self`
    pub async fn get_self(&self) -> Result<SelfInfo, Error> {
        debug!("fetching token identity");
        self.get("self").await
    }

    /// Fetch one organization.
    ///
    /// `GET /api/v1/orgs/{org_id}`
    pub async fn get_org(&self, org_id: &str) -> Result<Org, Error> {
        debug!(org_id, "fetching organization");
        self.get(&format!("orgs/{org_id}")).await
    }

    /// The organization id every org-scoped call should use.
    ///
    /// Resolved lazily on first use when not configured; concurrent first
    /// callers share a single `/self` lookup.
    pub async fn org_id(&self) -> Result<String, Error> {
        if let Some(id) = self.configured_org_id() {
            return Ok(id.to_owned());
        }

        self.resolved_org_id
            .get_or_try_init(|| async { self.first_privileged_org().await.map(|org| org.id) })
            .await
            .cloned()
    }

    /// Verify connectivity by retrieving an organization name.
    ///
    /// With a configured org id this looks the org up directly; otherwise it
    /// takes the first organization in the token's privileges (and caches
    /// its id, exactly as [`org_id`](Self::org_id) would).
    pub async fn test_connection(&self) -> Result<OrgSummary, Error> {
        if let Some(id) = self.configured_org_id() {
            let org = self.get_org(id).await?;
            return Ok(OrgSummary {
                id: id.to_owned(),
                name: org.name.unwrap_or_else(|| "Unknown".into()),
            });
        }

        let org = self.first_privileged_org().await?;
        // A concurrent resolver may have won the race; both saw the same list.
        let _ = self.resolved_org_id.set(org.id.clone());
        Ok(org)
    }

    async fn first_privileged_org(&self) -> Result<OrgSummary, Error> {
        let me = self.get_self().await?;
        me.privileges
            .into_iter()
            .find_map(|p| {
                let id = p.org_id.filter(|id| !id.is_empty())?;
                Some(OrgSummary {
                    id,
                    name: p.name.unwrap_or_else(|| "Unknown".into()),
                })
            })
            .ok_or(Error::NoOrganizations)
    }
}
