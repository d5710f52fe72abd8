use serde::{Deserialize, Serialize};

/// A guest-capable WLAN as presented to the operator.
///
/// Only enabled, portal-enabled WLANs are ever turned into this type.
/// `org_level` records which listing the WLAN came from; it does not
/// affect eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestNetwork {
    pub id: String,
    pub ssid: String,
    pub enabled: bool,
    pub auth_type: String,
    pub portal_enabled: bool,
    pub portal_auth: String,
    pub org_level: bool,
}
