use serde::{Deserialize, Serialize};

/// A wireless client currently associated at a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedClient {
    pub mac: String,
    pub hostname: String,
    pub ip: String,
    pub ssid: String,
    pub ap_mac: String,
    pub band: String,
    pub rssi: i64,
    pub os: String,
    pub manufacture: String,
    pub is_connected: bool,
}

impl ConnectedClient {
    /// Text the free-form search runs against.
    pub(crate) fn haystack(&self) -> String {
        format!("{} {} {} {}", self.mac, self.hostname, self.ip, self.ssid).to_lowercase()
    }

    /// Hostname if known, else MAC, lowercased.
    pub(crate) fn sort_key(&self) -> String {
        if self.hostname.is_empty() {
            self.mac.to_lowercase()
        } else {
            self.hostname.to_lowercase()
        }
    }
}
