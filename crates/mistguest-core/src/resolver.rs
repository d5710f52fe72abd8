// ── Site/network resolver ──
//
// Works out which sites expose at least one guest-portal WLAN using only
// org-scoped queries: the org WLAN list, plus the templates and site
// groups those WLANs point at. Lookups are memoized for the duration of a
// single `list_sites` call and never shared between calls.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use mistguest_api::MistClient;
use mistguest_api::models::{MistSite, MistWlan, TemplateApplies};

use crate::error::CoreError;
use crate::model::{GuestNetwork, Site, SiteWlans};

/// A WLAN qualifies as a guest network when it is enabled and its
/// captive portal is switched on.
pub(crate) fn is_guest_wlan(wlan: &MistWlan) -> bool {
    wlan.portal_enabled() && wlan.is_enabled()
}

/// Where an org WLAN is applied, before any lookups.
#[derive(Debug, PartialEq, Eq)]
enum Placement<'a> {
    Template(&'a str),
    AllSites,
    Explicit {
        site_ids: &'a [String],
        sitegroup_ids: &'a [String],
    },
}

impl<'a> Placement<'a> {
    fn of(wlan: &'a MistWlan) -> Self {
        if let Some(template_id) = wlan.template_id.as_deref().filter(|t| !t.is_empty()) {
            Self::Template(template_id)
        } else if wlan.apply_to.as_deref() == Some("all") {
            Self::AllSites
        } else {
            Self::Explicit {
                site_ids: &wlan.site_ids,
                sitegroup_ids: &wlan.sitegroup_ids,
            }
        }
    }
}

// ── Call-scoped memo ───────────────────────────────────────────────

/// Template and site-group lookups for one resolution pass. A failed
/// lookup is remembered as empty so it is not retried within the pass.
struct ScopeMemo<'c> {
    client: &'c MistClient,
    org_id: &'c str,
    templates: HashMap<String, TemplateApplies>,
    sitegroups: HashMap<String, Vec<String>>,
}

impl<'c> ScopeMemo<'c> {
    fn new(client: &'c MistClient, org_id: &'c str) -> Self {
        Self {
            client,
            org_id,
            templates: HashMap::new(),
            sitegroups: HashMap::new(),
        }
    }

    async fn template(&mut self, template_id: &str) -> TemplateApplies {
        if let Some(applies) = self.templates.get(template_id) {
            return applies.clone();
        }

        let applies = match self.client.get_org_template(self.org_id, template_id).await {
            Ok(template) => template.applies.unwrap_or_default(),
            Err(e) => {
                let err = lookup_error("template", template_id, e);
                warn!(template_id, error = %err, "template lookup failed; contributes no sites");
                TemplateApplies::default()
            }
        };
        self.templates
            .insert(template_id.to_owned(), applies.clone());
        applies
    }

    async fn sitegroup(&mut self, sitegroup_id: &str) -> Vec<String> {
        if let Some(members) = self.sitegroups.get(sitegroup_id) {
            return members.clone();
        }

        let members = match self.client.get_org_sitegroup(self.org_id, sitegroup_id).await {
            Ok(group) => group.site_ids,
            Err(e) => {
                let err = lookup_error("sitegroup", sitegroup_id, e);
                warn!(sitegroup_id, error = %err, "site group lookup failed; contributes no sites");
                Vec::new()
            }
        };
        self.sitegroups
            .insert(sitegroup_id.to_owned(), members.clone());
        members
    }

    async fn expand_groups(&mut self, sitegroup_ids: &[String], into: &mut HashSet<String>) {
        for group in sitegroup_ids {
            into.extend(self.sitegroup(group).await);
        }
    }
}

fn lookup_error(entity_type: &str, identifier: &str, err: mistguest_api::Error) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    } else {
        err.into()
    }
}

// ── Resolver ───────────────────────────────────────────────────────

/// Site and guest-network lookups for one organization.
pub struct SiteResolver {
    client: Arc<MistClient>,
}

impl SiteResolver {
    pub(crate) fn new(client: Arc<MistClient>) -> Self {
        Self { client }
    }

    /// All org sites sorted by name, optionally narrowed to sites with at
    /// least one guest-portal WLAN.
    pub async fn list_sites(&self, guest_only: bool) -> Result<Vec<Site>, CoreError> {
        let org_id = self.client.org_id().await?;
        let mut raw = self.client.list_org_sites(&org_id).await?;
        raw.sort_by_cached_key(|s: &MistSite| s.name.as_deref().unwrap_or_default().to_lowercase());

        let total = raw.len();
        let mut sites: Vec<Site> = raw.into_iter().map(Site::from).collect();
        if !guest_only {
            debug!(total, "listing all sites");
            return Ok(sites);
        }

        let all_ids: HashSet<String> = sites.iter().map(|s| s.id.clone()).collect();
        let eligible = self.eligible_site_ids(&org_id, &all_ids).await;
        sites.retain(|s| eligible.contains(&s.id));

        info!(eligible = sites.len(), total, "resolved sites with guest WLANs");
        Ok(sites)
    }

    async fn eligible_site_ids(&self, org_id: &str, all_ids: &HashSet<String>) -> HashSet<String> {
        let wlans = match self.client.list_org_wlans(org_id).await {
            Ok(wlans) => wlans,
            Err(e) => {
                warn!(error = %e, "could not fetch org WLANs for filtering");
                return HashSet::new();
            }
        };

        let mut memo = ScopeMemo::new(&self.client, org_id);
        let mut eligible = HashSet::new();

        for wlan in wlans.iter().filter(|w| is_guest_wlan(w)) {
            match Placement::of(wlan) {
                Placement::Template(template_id) => {
                    let applies = memo.template(template_id).await;
                    eligible.extend(applies.site_ids);
                    memo.expand_groups(&applies.sitegroup_ids, &mut eligible)
                        .await;
                }
                Placement::AllSites => eligible.extend(all_ids.iter().cloned()),
                Placement::Explicit {
                    site_ids,
                    sitegroup_ids,
                } => {
                    eligible.extend(site_ids.iter().cloned());
                    memo.expand_groups(sitegroup_ids, &mut eligible).await;
                }
            }
        }

        eligible
    }

    /// Guest-portal WLANs visible at a site, from both the site listing and
    /// the org listing. Each source is best-effort.
    pub async fn list_guest_networks(&self, site_id: &str) -> Vec<GuestNetwork> {
        let site_wlans = self
            .client
            .list_site_wlans(site_id)
            .await
            .unwrap_or_else(|e| {
                warn!(site_id, error = %e, "could not fetch site WLANs");
                Vec::new()
            });
        let org_wlans = self.org_wlans().await.unwrap_or_else(|e| {
            warn!(site_id, error = %e, "could not fetch org WLANs");
            Vec::new()
        });

        let mut seen = HashSet::new();
        let mut networks: Vec<GuestNetwork> = site_wlans
            .into_iter()
            .map(|w| (w, false))
            .chain(org_wlans.into_iter().map(|w| (w, true)))
            .filter(|(w, _)| seen.insert(w.id.clone()))
            .filter(|(w, _)| is_guest_wlan(w))
            .map(|(w, org_level)| GuestNetwork::from_wlan(w, org_level))
            .collect();

        networks.sort_by_cached_key(|n| n.ssid.to_lowercase());
        networks
    }

    async fn org_wlans(&self) -> Result<Vec<MistWlan>, CoreError> {
        let org_id = self.client.org_id().await?;
        Ok(self.client.list_org_wlans(&org_id).await?)
    }

    /// Lookup table for bulk import: lowercased site name to site id and
    /// lowercased SSID to WLAN id. Covers guest-eligible sites only.
    pub async fn sites_wlans_map(&self) -> Result<BTreeMap<String, SiteWlans>, CoreError> {
        let sites = self.list_sites(true).await?;
        let mut map = BTreeMap::new();

        for site in sites {
            let name = site.name.trim().to_lowercase();
            if name.is_empty() || site.id.is_empty() {
                continue;
            }

            let wlans = self
                .list_guest_networks(&site.id)
                .await
                .into_iter()
                .filter_map(|n| {
                    let ssid = n.ssid.trim().to_lowercase();
                    (!ssid.is_empty() && !n.id.is_empty()).then_some((ssid, n.id))
                })
                .collect();

            map.insert(name, SiteWlans { id: site.id, wlans });
        }

        info!(sites = map.len(), "built sites/WLANs map");
        Ok(map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wlan(value: serde_json::Value) -> MistWlan {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn guest_wlan_needs_portal_and_enabled() {
        assert!(is_guest_wlan(&wlan(json!({ "id": "a", "portal": { "enabled": true } }))));
        assert!(!is_guest_wlan(&wlan(json!({ "id": "b" }))));
        assert!(!is_guest_wlan(&wlan(json!({
            "id": "c", "enabled": false, "portal": { "enabled": true }
        }))));
    }

    #[test]
    fn template_takes_precedence_over_apply_to() {
        let w = wlan(json!({ "id": "a", "template_id": "t1", "apply_to": "all" }));
        assert_eq!(Placement::of(&w), Placement::Template("t1"));
    }

    #[test]
    fn apply_to_all_without_template() {
        let w = wlan(json!({ "id": "a", "apply_to": "all", "site_ids": ["s1"] }));
        assert_eq!(Placement::of(&w), Placement::AllSites);
    }

    #[test]
    fn explicit_placement_carries_sites_and_groups() {
        let w = wlan(json!({
            "id": "a", "apply_to": "site", "site_ids": ["s1"], "sitegroup_ids": ["g1"]
        }));
        match Placement::of(&w) {
            Placement::Explicit {
                site_ids,
                sitegroup_ids,
            } => {
                assert_eq!(site_ids, ["s1"]);
                assert_eq!(sitegroup_ids, ["g1"]);
            }
            other => panic!("unexpected placement: {other:?}"),
        }
    }
}
