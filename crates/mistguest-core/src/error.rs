// ── Core error types ──
//
// Caller-facing errors from mistguest-core. Transport details from
// mistguest-api are folded into `UpstreamUnavailable`; the HTTP shell
// decides which variants are the caller's fault.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller errors ────────────────────────────────────────────────
    #[error("Invalid MAC address format: {input}")]
    InvalidMacAddress { input: String },

    #[error("No fields to update")]
    NoFieldsToUpdate,

    // ── Upstream errors ──────────────────────────────────────────────
    /// Transport, authentication, or API failure talking to Mist.
    #[error("{message}")]
    UpstreamUnavailable { message: String },

    /// Both the site-scoped write and its org-scoped retry failed.
    /// `message` is the org-scope failure.
    #[error("{action} failed: {message}")]
    WriteFailed {
        action: &'static str,
        message: String,
    },

    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("No organizations found for this API token")]
    NoOrganizationsFound,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Errors the caller can fix by changing the request.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMacAddress { .. } | Self::NoFieldsToUpdate | Self::WriteFailed { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<mistguest_api::Error> for CoreError {
    fn from(err: mistguest_api::Error) -> Self {
        match err {
            mistguest_api::Error::NoOrganizations => CoreError::NoOrganizationsFound,
            mistguest_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            mistguest_api::Error::ClientSetup(message) => CoreError::Config { message },
            other @ (mistguest_api::Error::Authentication { .. }
            | mistguest_api::Error::Transport(_)
            | mistguest_api::Error::Api { .. }
            | mistguest_api::Error::Deserialization { .. }) => CoreError::UpstreamUnavailable {
                message: other.to_string(),
            },
        }
    }
}
