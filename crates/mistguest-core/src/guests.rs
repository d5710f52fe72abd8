// ── Guest authorization manager ──
//
// Create, update, list, and expire guest authorization records. Writes go
// to the site scope and fall back once to the org scope; expiry is a
// write of `minutes: 0`, never a delete.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use mistguest_api::{GuestScope, MistClient, WriteReceipt};

use crate::error::CoreError;
use crate::fallback::{self, Outcome, Tier};
use crate::mac::MacAddress;
use crate::model::guest::DEFAULT_MINUTES;
use crate::model::{FieldUpdate, Guest, GuestAuthorization, GuestUpdate};

/// Written into `field4` when the credential's name cannot be looked up.
pub const UNKNOWN_TOKEN_NAME: &str = "Unknown Token";

/// Body of an authorize write. Optional fields are omitted when empty.
#[derive(Debug, Serialize)]
struct AuthorizeBody<'a> {
    mac: &'a str,
    minutes: u32,
    authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field3: Option<&'a str>,
    field4: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    notify: bool,
    wlan_id: &'a str,
}

/// `Some` only for non-empty text.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Build the partial-update body: only supplied fields, `Clear` as `null`,
/// and `field4` always set to the credential's name.
fn update_body(update: &GuestUpdate, token_name: &str) -> Map<String, Value> {
    let mut body = Map::new();
    for (key, field) in update.text_fields() {
        match field {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Set(value) => {
                body.insert(key.into(), Value::String(value.clone()));
            }
            FieldUpdate::Clear => {
                body.insert(key.into(), Value::Null);
            }
        }
    }
    body.insert("field4".into(), Value::String(token_name.to_owned()));
    if let Some(minutes) = update.minutes {
        body.insert("minutes".into(), Value::from(minutes));
    }
    body
}

/// Record projection for a write that just succeeded at `now`.
fn written_guest(mac: &MacAddress, wlan_id: &str, minutes: u32, now: i64) -> Guest {
    let expires_at = now + i64::from(minutes) * 60;
    Guest {
        mac: mac.to_string(),
        name: String::new(),
        email: String::new(),
        company: String::new(),
        field1: String::new(),
        field2: String::new(),
        field3: String::new(),
        field4: String::new(),
        authorized_time: now,
        authorized_expiring_time: expires_at,
        remaining_minutes: Guest::remaining_minutes_at(expires_at, now),
        is_expired: Guest::is_expired_at(expires_at, now),
        auth_method: "manual".into(),
        ssid: String::new(),
        wlan_id: wlan_id.to_owned(),
    }
}

/// Guest authorization lifecycle against one Mist organization.
pub struct GuestManager {
    client: Arc<MistClient>,
}

impl GuestManager {
    pub(crate) fn new(client: Arc<MistClient>) -> Self {
        Self { client }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Guests authorized on a WLAN, active first.
    ///
    /// Lists at site scope filtered by WLAN; if that fails, lists the whole
    /// org scope instead. Errors only when both listings fail.
    pub async fn list(&self, site_id: &str, wlan_id: &str) -> Result<Vec<Guest>, CoreError> {
        let outcome = fallback::two_tier(
            self.client
                .list_guest_authorizations(GuestScope::Site(site_id), Some(wlan_id)),
            || async {
                let org_id = self.client.org_id().await?;
                self.client
                    .list_guest_authorizations(GuestScope::Org(&org_id), None)
                    .await
            },
        )
        .await;

        if let Outcome::Secondary { primary_error, .. } = &outcome {
            debug!(site_id, error = %primary_error, "site guest listing failed; used org listing");
        }
        let (records, _) = outcome.into_result()?;

        let now = Utc::now().timestamp();
        let mut guests: Vec<Guest> = records
            .into_iter()
            .map(|r| Guest::from_record(r, wlan_id, now))
            .collect();
        Guest::sort_for_display(&mut guests);
        Ok(guests)
    }

    /// Display name of the credential performing writes.
    pub async fn token_name(&self) -> String {
        match self.client.get_self().await {
            Ok(me) => me.name.unwrap_or_else(|| UNKNOWN_TOKEN_NAME.into()),
            Err(e) => {
                warn!(error = %e, "could not look up token name");
                UNKNOWN_TOKEN_NAME.into()
            }
        }
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Site-scoped write with one org-scoped retry using the same body.
    async fn write_with_fallback<B: Serialize + Sync>(
        &self,
        action: &'static str,
        site_id: &str,
        mac: &MacAddress,
        body: &B,
    ) -> Result<Tier, CoreError> {
        let compact = mac.compact();
        let outcome = fallback::two_tier(
            self.client
                .upsert_guest_authorization(GuestScope::Site(site_id), &compact, body),
            || async {
                let org_id = self.client.org_id().await?;
                self.client
                    .upsert_guest_authorization(GuestScope::Org(&org_id), &compact, body)
                    .await
            },
        )
        .await;

        match outcome {
            Outcome::Primary(_) => Ok(Tier::Primary),
            Outcome::Secondary { primary_error, .. } => {
                warn!(site_id, %mac, error = %primary_error, "site-level write failed; org-level retry succeeded");
                Ok(Tier::Secondary)
            }
            Outcome::Failed {
                primary_error,
                secondary_error,
            } => {
                warn!(site_id, %mac, error = %primary_error, "site-level write failed");
                let err = secondary_error.unwrap_or(primary_error);
                warn!(site_id, %mac, error = %err, "org-level write also failed");
                Err(CoreError::WriteFailed {
                    action,
                    message: err.to_string(),
                })
            }
        }
    }

    /// Authorize a device on a WLAN for `request.minutes`.
    pub async fn authorize(
        &self,
        site_id: &str,
        wlan_id: &str,
        request: &GuestAuthorization,
    ) -> Result<Guest, CoreError> {
        let mac = MacAddress::parse(&request.mac)?;
        let token_name = self.token_name().await;

        let body = AuthorizeBody {
            mac: mac.as_str(),
            minutes: request.minutes,
            authorized: true,
            name: non_empty(request.name.as_ref()),
            email: non_empty(request.email.as_ref()),
            company: non_empty(request.company.as_ref()),
            field1: non_empty(request.field1.as_ref()),
            field2: non_empty(request.field2.as_ref()),
            field3: non_empty(request.field3.as_ref()),
            field4: &token_name,
            notify: request.notify,
            wlan_id,
        };

        let tier = self
            .write_with_fallback("Authorization", site_id, &mac, &body)
            .await?;
        info!(site_id, wlan_id, %mac, minutes = request.minutes, ?tier, "guest authorized");

        let mut guest = written_guest(&mac, wlan_id, request.minutes, Utc::now().timestamp());
        guest.name = request.name.clone().unwrap_or_default();
        guest.email = request.email.clone().unwrap_or_default();
        guest.company = request.company.clone().unwrap_or_default();
        guest.field1 = request.field1.clone().unwrap_or_default();
        guest.field2 = request.field2.clone().unwrap_or_default();
        guest.field3 = request.field3.clone().unwrap_or_default();
        guest.field4 = token_name;
        Ok(guest)
    }

    /// Change some fields of an existing authorization.
    ///
    /// Only supplied fields are written. The expiry in the returned record
    /// uses `minutes` when given, else the default day-long window.
    pub async fn update(
        &self,
        site_id: &str,
        wlan_id: &str,
        mac: &str,
        update: &GuestUpdate,
    ) -> Result<Guest, CoreError> {
        let mac = MacAddress::parse(mac)?;
        if update.is_empty() {
            return Err(CoreError::NoFieldsToUpdate);
        }

        let token_name = self.token_name().await;
        let body = update_body(update, &token_name);

        let tier = self
            .write_with_fallback("Update", site_id, &mac, &body)
            .await?;
        info!(site_id, wlan_id, %mac, ?tier, "guest updated");

        let minutes = update.minutes.unwrap_or(DEFAULT_MINUTES);
        let mut guest = written_guest(&mac, wlan_id, minutes, Utc::now().timestamp());
        let text = |f: &FieldUpdate<String>| f.as_set().cloned().unwrap_or_default();
        guest.name = text(&update.name);
        guest.email = text(&update.email);
        guest.company = text(&update.company);
        guest.field1 = text(&update.field1);
        guest.field2 = text(&update.field2);
        guest.field3 = text(&update.field3);
        guest.field4 = token_name;
        Ok(guest)
    }

    /// Expire an authorization immediately by writing `minutes: 0` at site
    /// scope. There is no org-scope retry.
    pub async fn deauthorize(
        &self,
        site_id: &str,
        wlan_id: &str,
        mac: &str,
    ) -> Result<(), CoreError> {
        let mac = MacAddress::parse(mac)?;
        info!(site_id, wlan_id, %mac, "expiring guest authorization");

        let receipt: WriteReceipt = self
            .client
            .upsert_guest_authorization(
                GuestScope::Site(site_id),
                &mac.compact(),
                &serde_json::json!({ "minutes": 0 }),
            )
            .await
            .map_err(|e| {
                warn!(site_id, %mac, error = %e, "deauthorize failed");
                CoreError::UpstreamUnavailable {
                    message: e.to_string(),
                }
            })?;

        debug!(status = receipt.status, "deauthorize accepted");
        Ok(())
    }
}
