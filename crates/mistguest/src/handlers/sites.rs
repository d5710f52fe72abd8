use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use super::{Path, Query};
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SitesQuery {
    /// `true` lists every site instead of only guest-eligible ones.
    #[serde(default)]
    pub all: bool,
}

/// `GET /api/sites`
pub async fn list_sites(
    State(state): State<AppState>,
    Query(query): Query<SitesQuery>,
) -> Result<Json<Value>, ApiError> {
    let sites = state
        .portal
        .sites()
        .list_sites(!query.all)
        .await
        .inspect_err(|e| error!(error = %e, "failed to list sites"))?;
    debug!(count = sites.len(), guest_only = !query.all, "listed sites");
    Ok(Json(json!({ "success": true, "sites": sites })))
}

/// `GET /api/sites/{site_id}/wlans`
pub async fn list_wlans(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
) -> Json<Value> {
    let wlans = state.portal.sites().list_guest_networks(&site_id).await;
    debug!(site_id = %site_id, count = wlans.len(), "listed guest networks");
    Json(json!({ "success": true, "wlans": wlans }))
}

/// `GET /api/sites-wlans-map`
pub async fn sites_wlans_map(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let map = state
        .portal
        .sites()
        .sites_wlans_map()
        .await
        .inspect_err(|e| error!(error = %e, "failed to build sites/WLANs map"))?;
    Ok(Json(json!({ "success": true, "map": map })))
}
