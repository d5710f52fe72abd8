// ── HTTP error responses ──
//
// Every failure leaves the service as `{"success": false, "error": "..."}`
// with a status chosen by the handler: mutations and the connection check
// report 400, listings report 500 unless the caller was at fault.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mistguest_core::CoreError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Request without a usable JSON body.
    pub fn no_data() -> Self {
        Self::bad_request("No data provided")
    }

    /// A failed write or connection check: always the caller's to retry.
    pub fn rejected(err: &CoreError) -> Self {
        match err {
            CoreError::Config { .. } => Self::internal(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

/// Read-path failures: 400 for caller mistakes, 500 otherwise.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_caller_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}
