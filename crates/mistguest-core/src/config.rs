// ── Runtime connection configuration ──
//
// Describes how to reach the Mist cloud. Carries credential data and
// connection tuning but never touches disk; the binary builds a
// `PortalConfig` from its own config layer and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Default Mist cloud API host (global region 01).
pub const DEFAULT_HOST: &str = "api.mist.com";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Additionally trust a custom CA certificate file.
    CustomCa(PathBuf),
}

/// Configuration for one Mist organization session.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// API host, bare (`api.eu.mist.com`) or as a full URL.
    pub host: String,
    /// Mist API token.
    pub api_token: SecretString,
    /// Organization to operate on. Resolved from the token when unset.
    pub org_id: Option<String>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PortalConfig {
    pub fn new(api_token: SecretString) -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            api_token,
            org_id: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&TlsVerification> for mistguest_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
        }
    }
}
