// ── Connected-client search ──

use std::sync::Arc;

use tracing::{debug, warn};

use mistguest_api::MistClient;

use crate::model::ConnectedClient;

/// Keep clients whose `"{mac} {hostname} {ip} {ssid}"` contains `query`
/// (case-insensitive), then order by hostname, falling back to MAC.
pub(crate) fn filter_and_sort(clients: Vec<ConnectedClient>, query: &str) -> Vec<ConnectedClient> {
    let needle = query.to_lowercase();
    let mut matched: Vec<ConnectedClient> = if needle.is_empty() {
        clients
    } else {
        clients
            .into_iter()
            .filter(|c| c.haystack().contains(&needle))
            .collect()
    };
    matched.sort_by_cached_key(ConnectedClient::sort_key);
    matched
}

/// Free-text search over the wireless clients connected at a site.
pub struct ClientSearch {
    client: Arc<MistClient>,
}

impl ClientSearch {
    pub(crate) fn new(client: Arc<MistClient>) -> Self {
        Self { client }
    }

    /// Matching connected clients. A failed stats fetch yields no results.
    pub async fn search(&self, site_id: &str, query: &str) -> Vec<ConnectedClient> {
        let clients = match self.client.list_site_wireless_clients(site_id).await {
            Ok(raw) => raw.into_iter().map(ConnectedClient::from).collect(),
            Err(e) => {
                warn!(site_id, error = %e, "could not fetch wireless client stats");
                Vec::new()
            }
        };

        let results = filter_and_sort(clients, query);
        debug!(site_id, query, matches = results.len(), "client search");
        results
    }
}
