use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Path, Query};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// `GET /api/sites/{site_id}/clients/search?query=`
pub async fn search_clients(
    State(state): State<AppState>,
    Path(site_id): Path<String>,
    Query(search): Query<SearchQuery>,
) -> Json<Value> {
    let clients = state.portal.clients().search(&site_id, &search.query).await;
    Json(json!({ "success": true, "clients": clients }))
}
