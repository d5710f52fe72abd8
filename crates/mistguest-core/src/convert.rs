// ── API-to-domain type conversions ──
//
// Bridges raw `mistguest_api` models into `mistguest_core::model` types,
// filling the defaults the frontend expects for missing fields.

use mistguest_api::models::{MistGuest, MistSite, MistWirelessClient, MistWlan};

use crate::mac;
use crate::model::{ConnectedClient, Guest, GuestNetwork, Site};

// ── Site ───────────────────────────────────────────────────────────

impl From<MistSite> for Site {
    fn from(s: MistSite) -> Self {
        Site {
            id: s.id,
            name: s.name.unwrap_or_else(|| "Unknown".into()),
            address: s.address.unwrap_or_default(),
            country_code: s.country_code.unwrap_or_default(),
            timezone: s.timezone.unwrap_or_default(),
        }
    }
}

// ── Network ────────────────────────────────────────────────────────

impl GuestNetwork {
    pub(crate) fn from_wlan(wlan: MistWlan, org_level: bool) -> Self {
        let enabled = wlan.is_enabled();
        let portal_enabled = wlan.portal_enabled();
        GuestNetwork {
            id: wlan.id,
            ssid: wlan.ssid.unwrap_or_else(|| "Unknown".into()),
            enabled,
            auth_type: wlan.auth.and_then(|a| a.auth_type).unwrap_or_default(),
            portal_enabled,
            portal_auth: wlan
                .portal
                .and_then(|p| p.auth)
                .unwrap_or_else(|| "none".into()),
            org_level,
        }
    }
}

// ── Guest ──────────────────────────────────────────────────────────

impl Guest {
    /// Project a stored record, deriving expiry state relative to `now`.
    ///
    /// `requested_wlan` fills in records that do not name their WLAN.
    pub(crate) fn from_record(record: MistGuest, requested_wlan: &str, now: i64) -> Self {
        let raw_mac = record.mac.unwrap_or_default();
        let expires_at = record.authorized_expiring_time.unwrap_or(0);

        Guest {
            mac: mac::normalize(&raw_mac).unwrap_or(raw_mac),
            name: record.name.unwrap_or_default(),
            email: record.email.unwrap_or_default(),
            company: record.company.unwrap_or_default(),
            field1: record.field1.unwrap_or_default(),
            field2: record.field2.unwrap_or_default(),
            field3: record.field3.unwrap_or_default(),
            field4: record.field4.unwrap_or_default(),
            authorized_time: record.authorized_time.unwrap_or(0),
            authorized_expiring_time: expires_at,
            remaining_minutes: Guest::remaining_minutes_at(expires_at, now),
            is_expired: Guest::is_expired_at(expires_at, now),
            auth_method: record.auth_method.unwrap_or_else(|| "manual".into()),
            ssid: record.ssid.unwrap_or_default(),
            wlan_id: record.wlan_id.unwrap_or_else(|| requested_wlan.to_owned()),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

impl From<MistWirelessClient> for ConnectedClient {
    fn from(c: MistWirelessClient) -> Self {
        ConnectedClient {
            mac: c.mac.unwrap_or_default(),
            hostname: c.hostname.unwrap_or_default(),
            ip: c.ip.unwrap_or_default(),
            ssid: c.ssid.unwrap_or_default(),
            ap_mac: c.ap_mac.unwrap_or_default(),
            band: c.band.unwrap_or_default(),
            rssi: c.rssi.unwrap_or(0),
            os: c.os.unwrap_or_default(),
            manufacture: c.manufacture.unwrap_or_default(),
            is_connected: true,
        }
    }
}
