use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::AppState;
use crate::error::ApiError;

/// `POST /api/test-connection`
pub async fn test_connection(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.portal.test_connection().await {
        Ok(org) => {
            info!(org_name = %org.name, "Mist API connection test succeeded");
            Ok(Json(json!({
                "success": true,
                "message": "Connected to Mist API successfully",
                "org_name": org.name,
                "org_id": org.id,
            })))
        }
        Err(e) => {
            warn!(error = %e, "Mist API connection test failed");
            Err(ApiError::rejected(&e))
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
