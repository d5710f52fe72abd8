// Bulk import: the browser parses the CSV and posts one row at a time,
// already resolved to ids through `/api/sites-wlans-map`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use mistguest_core::GuestAuthorization;
use mistguest_core::model::guest::DEFAULT_MINUTES;

use super::guests::required_mac;
use super::{json_body, lenient_minutes};
use crate::AppState;
use crate::error::ApiError;

pub const CSV_TEMPLATE_FILENAME: &str = "guest_import_template.csv";

const CSV_TEMPLATE: &str = "\
site_name,ssid,mac,name,email,company,field1,field2,field3_sponsor_email,minutes
Main Office,Guest-WiFi,AA:BB:CC:DD:EE:FF,John Smith,john.smith@example.com,Acme Corp,Badge #12345,Building A,sponsor@company.com,1440
Branch Office,Visitor-Network,11:22:33:44:55:66,Jane Doe,jane.doe@example.com,Partner Inc,,,host@company.com,480
";

/// One resolved CSV row.
#[derive(Debug, Default, Deserialize)]
pub struct ImportRow {
    pub site_id: Option<String>,
    pub wlan_id: Option<String>,
    pub mac: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub minutes: Option<u32>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `POST /api/bulk-import`
pub async fn bulk_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let row: ImportRow = json_body(&body)?;
    let site_id = present(row.site_id).ok_or_else(|| ApiError::bad_request("Site not found"))?;
    let wlan_id = present(row.wlan_id).ok_or_else(|| ApiError::bad_request("WLAN not found"))?;
    let mac = required_mac(row.mac)?;

    let request = GuestAuthorization {
        mac,
        name: row.name,
        email: row.email,
        company: row.company,
        field1: row.field1,
        field2: row.field2,
        field3: row.field3,
        field4: None,
        minutes: row.minutes.unwrap_or(DEFAULT_MINUTES),
        notify: false,
    };

    let guest = state
        .portal
        .guests()
        .authorize(&site_id, &wlan_id, &request)
        .await
        .map_err(|e| {
            warn!(mac = %request.mac, error = %e, "bulk import: failed to authorize guest");
            ApiError::rejected(&e)
        })?;
    Ok(Json(json!({ "success": true, "guest": guest })))
}

/// `GET /api/csv-template`
pub async fn csv_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={CSV_TEMPLATE_FILENAME}"),
            ),
        ],
        CSV_TEMPLATE,
    )
}
