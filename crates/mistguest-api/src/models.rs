// Mist API response types
//
// Models for the Mist v1 JSON API. Fields use `#[serde(default)]` liberally
// because the API omits unset fields and sometimes sends explicit `null`
// for list-valued ones.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Listing envelope ─────────────────────────────────────────────────

/// A listing body: either a bare JSON array or `{ "results": [...] }`
/// (the guest-authorization search endpoints use the latter).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Items(items) | Self::Wrapped { results: items } => items,
        }
    }
}

// ── Identity ─────────────────────────────────────────────────────────

/// `GET /self` — the identity behind the API token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfInfo {
    /// Token name for API tokens, or the admin's name for user tokens.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privileges: Vec<Privilege>,
}

/// One privilege entry (`scope` is `org`, `site`, or `msp`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Privilege {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    /// Organization name for org-scoped privileges.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// `GET /orgs/{org_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Org {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Sites ────────────────────────────────────────────────────────────

/// Site from `GET /orgs/{org_id}/sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistSite {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sitegroup_ids: Vec<String>,
}

// ── WLANs ────────────────────────────────────────────────────────────

/// WLAN definition, from either `GET /orgs/{org_id}/wlans` or
/// `GET /sites/{site_id}/wlans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistWlan {
    pub id: String,
    #[serde(default)]
    pub ssid: Option<String>,
    /// Absent means enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub auth: Option<WlanAuth>,
    #[serde(default)]
    pub portal: Option<WlanPortal>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    /// Set when the WLAN belongs to a configuration template.
    #[serde(default)]
    pub template_id: Option<String>,
    /// `"all"`, `"site"`, or `"wxtags"` for template-less org WLANs.
    #[serde(default)]
    pub apply_to: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sitegroup_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WlanAuth {
    #[serde(default, rename = "type")]
    pub auth_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WlanPortal {
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Portal auth mode (`none`, `sponsor`, `sso`, `external`, …).
    #[serde(default)]
    pub auth: Option<String>,
}

impl MistWlan {
    /// Enabled unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Captive portal switched on.
    pub fn portal_enabled(&self) -> bool {
        self.portal
            .as_ref()
            .and_then(|p| p.enabled)
            .unwrap_or(false)
    }
}

// ── Templates / site groups ──────────────────────────────────────────

/// `GET /orgs/{org_id}/templates/{template_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistTemplate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub applies: Option<TemplateApplies>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateApplies {
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sitegroup_ids: Vec<String>,
}

/// `GET /orgs/{org_id}/sitegroups/{sitegroup_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistSiteGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_ids: Vec<String>,
}

// ── Guest authorizations ─────────────────────────────────────────────

/// Guest authorization record from `GET /sites/{id}/guests` or
/// `GET /orgs/{id}/guests`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MistGuest {
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub field1: Option<String>,
    #[serde(default)]
    pub field2: Option<String>,
    #[serde(default)]
    pub field3: Option<String>,
    #[serde(default)]
    pub field4: Option<String>,
    #[serde(default)]
    pub authorized: Option<bool>,
    /// Epoch seconds.
    #[serde(default)]
    pub authorized_time: Option<i64>,
    /// Epoch seconds.
    #[serde(default)]
    pub authorized_expiring_time: Option<i64>,
    #[serde(default)]
    pub auth_method: Option<String>,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub wlan_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
}

// ── Client stats ─────────────────────────────────────────────────────

/// Connected wireless client from `GET /sites/{site_id}/stats/clients`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MistWirelessClient {
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub ap_mac: Option<String>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub rssi: Option<i64>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub manufacture: Option<String>,
}
