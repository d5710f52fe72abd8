use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A Mist site. Fetched per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub address: String,
    pub country_code: String,
    pub timezone: String,
}

/// One entry of the bulk-import lookup table: a site id plus its guest
/// networks keyed by lowercased SSID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteWlans {
    pub id: String,
    pub wlans: BTreeMap<String, String>,
}
