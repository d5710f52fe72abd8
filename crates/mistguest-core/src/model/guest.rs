// ── Guest authorization types ──

use serde::{Deserialize, Serialize};

/// Default authorization length when an update does not specify one.
pub const DEFAULT_MINUTES: u32 = 1440;

/// A guest authorization record as presented to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub mac: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub field1: String,
    pub field2: String,
    pub field3: String,
    /// Display name of the credential that last wrote this record.
    pub field4: String,
    /// Epoch seconds.
    pub authorized_time: i64,
    /// Epoch seconds.
    pub authorized_expiring_time: i64,
    pub remaining_minutes: i64,
    pub is_expired: bool,
    pub auth_method: String,
    pub ssid: String,
    pub wlan_id: String,
}

impl Guest {
    /// Whole minutes left at `now`, never negative.
    pub fn remaining_minutes_at(expires_at: i64, now: i64) -> i64 {
        expires_at.saturating_sub(now).max(0) / 60
    }

    /// Expired once the expiry instant has been reached.
    pub fn is_expired_at(expires_at: i64, now: i64) -> bool {
        expires_at <= now
    }

    /// Active guests first, each group newest-expiry first.
    pub fn sort_for_display(guests: &mut [Guest]) {
        guests.sort_by_key(|g| (g.is_expired, std::cmp::Reverse(g.authorized_expiring_time)));
    }
}

/// Request to create (or refresh) a guest authorization.
///
/// Empty optional fields are omitted from the write. `field4` is accepted
/// for symmetry with the record shape but always replaced by the
/// credential's display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestAuthorization {
    pub mac: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    pub minutes: u32,
    pub notify: bool,
}

/// Presence marker for one field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value alone (field omitted from the write).
    #[default]
    Unchanged,
    /// Overwrite with this value.
    Set(T),
    /// Clear the stored value (sent as JSON `null`).
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged | Self::Clear => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `None` means "not supplied", not "clear".
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }
}

/// Partial update of an existing guest authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestUpdate {
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub company: FieldUpdate<String>,
    pub field1: FieldUpdate<String>,
    pub field2: FieldUpdate<String>,
    pub field3: FieldUpdate<String>,
    /// Ignored; the credential's display name is always written.
    pub field4: FieldUpdate<String>,
    pub minutes: Option<u32>,
}

impl GuestUpdate {
    /// The caller-settable fields in wire order, `field4` excluded.
    pub(crate) fn text_fields(&self) -> [(&'static str, &FieldUpdate<String>); 6] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("company", &self.company),
            ("field1", &self.field1),
            ("field2", &self.field2),
            ("field3", &self.field3),
        ]
    }

    /// True when nothing but `field4` was supplied.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_none() && self.text_fields().iter().all(|(_, f)| f.is_unchanged())
    }
}
