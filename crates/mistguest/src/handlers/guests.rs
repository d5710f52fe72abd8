use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use mistguest_core::model::guest::DEFAULT_MINUTES;
use mistguest_core::{GuestAuthorization, GuestUpdate};

use super::{Path, json_body, lenient_minutes};
use crate::AppState;
use crate::error::ApiError;

/// Body of `POST .../guests`.
#[derive(Debug, Default, Deserialize)]
pub struct AuthorizeRequest {
    pub mac: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub notify: Option<bool>,
}

impl AuthorizeRequest {
    fn into_authorization(self) -> Result<GuestAuthorization, ApiError> {
        let mac = required_mac(self.mac)?;
        Ok(GuestAuthorization {
            mac,
            name: self.name,
            email: self.email,
            company: self.company,
            field1: self.field1,
            field2: self.field2,
            field3: self.field3,
            field4: self.field4,
            minutes: self.minutes.unwrap_or(DEFAULT_MINUTES),
            notify: self.notify.unwrap_or(false),
        })
    }
}

/// Body of `PUT .../guests/{mac}`. Absent and `null` fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    pub field4: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub minutes: Option<u32>,
}

impl From<UpdateRequest> for GuestUpdate {
    fn from(req: UpdateRequest) -> Self {
        Self {
            name: req.name.into(),
            email: req.email.into(),
            company: req.company.into(),
            field1: req.field1.into(),
            field2: req.field2.into(),
            field3: req.field3.into(),
            field4: req.field4.into(),
            minutes: req.minutes,
        }
    }
}

pub(crate) fn required_mac(mac: Option<String>) -> Result<String, ApiError> {
    mac.filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("MAC address is required"))
}

/// `GET /api/sites/{site_id}/wlans/{wlan_id}/guests`
pub async fn list_guests(
    State(state): State<AppState>,
    Path((site_id, wlan_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let guests = state
        .portal
        .guests()
        .list(&site_id, &wlan_id)
        .await
        .inspect_err(|e| error!(site_id = %site_id, wlan_id = %wlan_id, error = %e, "failed to list guests"))?;
    Ok(Json(json!({ "success": true, "guests": guests })))
}

/// `POST /api/sites/{site_id}/wlans/{wlan_id}/guests`
pub async fn authorize_guest(
    State(state): State<AppState>,
    Path((site_id, wlan_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = json_body::<AuthorizeRequest>(&body)?.into_authorization()?;
    let guest = state
        .portal
        .guests()
        .authorize(&site_id, &wlan_id, &request)
        .await
        .map_err(|e| {
            warn!(mac = %request.mac, error = %e, "failed to authorize guest");
            ApiError::rejected(&e)
        })?;
    Ok(Json(json!({ "success": true, "guest": guest })))
}

/// `PUT /api/sites/{site_id}/wlans/{wlan_id}/guests/{mac}`
pub async fn update_guest(
    State(state): State<AppState>,
    Path((site_id, wlan_id, mac)): Path<(String, String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let update: GuestUpdate = json_body::<UpdateRequest>(&body)?.into();
    let guest = state
        .portal
        .guests()
        .update(&site_id, &wlan_id, &mac, &update)
        .await
        .map_err(|e| {
            warn!(mac = %mac, error = %e, "failed to update guest");
            ApiError::rejected(&e)
        })?;
    Ok(Json(json!({ "success": true, "guest": guest })))
}

/// `DELETE /api/sites/{site_id}/wlans/{wlan_id}/guests/{mac}`
pub async fn deauthorize_guest(
    State(state): State<AppState>,
    Path((site_id, wlan_id, mac)): Path<(String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    state
        .portal
        .guests()
        .deauthorize(&site_id, &wlan_id, &mac)
        .await
        .map_err(|e| {
            warn!(mac = %mac, error = %e, "failed to deauthorize guest");
            ApiError::rejected(&e)
        })?;
    Ok(Json(json!({ "success": true })))
}
