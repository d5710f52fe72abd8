// ── Portal facade ──
//
// Owns the process-wide Mist session and hands out the guest-portal
// components built on it. Cloning a `Portal` is cheap; every clone shares
// the same HTTP connection pool and resolved organization id.

use std::sync::Arc;

use tracing::{info, warn};

use mistguest_api::{MistClient, OrgSummary, TransportConfig};

use crate::config::PortalConfig;
use crate::error::CoreError;
use crate::guests::GuestManager;
use crate::resolver::SiteResolver;
use crate::search::ClientSearch;

/// Entry point for every guest-portal operation.
#[derive(Clone)]
pub struct Portal {
    client: Arc<MistClient>,
}

impl Portal {
    /// Build the session from configuration. No network traffic happens
    /// until the first operation.
    pub fn connect(config: &PortalConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
        };
        let client = MistClient::from_api_token(
            &config.host,
            &config.api_token,
            config.org_id.clone(),
            &transport,
        )?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already-built API client.
    pub fn from_client(client: MistClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &MistClient {
        &self.client
    }

    /// Verify the credential by retrieving the organization's name.
    pub async fn test_connection(&self) -> Result<OrgSummary, CoreError> {
        match self.client.test_connection().await {
            Ok(org) => {
                info!(org_id = %org.id, org_name = %org.name, "connected to Mist");
                Ok(org)
            }
            Err(e) => {
                warn!(error = %e, "connection test failed");
                Err(e.into())
            }
        }
    }

    /// Site and network lookups.
    pub fn sites(&self) -> SiteResolver {
        SiteResolver::new(Arc::clone(&self.client))
    }

    /// Guest authorization lifecycle.
    pub fn guests(&self) -> GuestManager {
        GuestManager::new(Arc::clone(&self.client))
    }

    /// Connected-client search.
    pub fn clients(&self) -> ClientSearch {
        ClientSearch::new(Arc::clone(&self.client))
    }
}
