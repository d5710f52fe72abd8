use thiserror::Error;

/// Top-level error type for the `mistguest-api` crate.
///
/// Covers every failure mode of the Mist REST surface: authentication,
/// transport, API status errors, and payload decoding.
/// `mistguest-core` maps these into the guest-portal error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API token rejected (missing, revoked, or lacking privileges).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The token's privilege list carries no organization.
    #[error("No organizations found for this API token")]
    NoOrganizations,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed (bad CA file, bad header).
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response. `detail` is the server's `{"detail": "..."}` message.
    #[error("{}", api_message(.status, .detail.as_deref()))]
    Api { status: u16, detail: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn api_message(status: &u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => detail.to_owned(),
        None => format!("API error (status: {status})"),
    }
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_server_detail() {
        let err = Error::Api {
            status: 400,
            detail: Some("mac is invalid".into()),
        };
        assert_eq!(err.to_string(), "mac is invalid");
    }

    #[test]
    fn api_error_without_detail_reports_status() {
        let err = Error::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "API error (status: 502)");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn not_found_detection() {
        let err = Error::Api {
            status: 404,
            detail: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }
}
