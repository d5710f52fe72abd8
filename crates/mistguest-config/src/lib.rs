//! Configuration for the mistguest service.
//!
//! Layered settings (defaults, optional TOML file, environment), API token
//! resolution (env + keyring + plaintext), and translation to
//! `mistguest_core::PortalConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mistguest_core::{PortalConfig, TlsVerification};

/// Environment variable holding the Mist API token.
pub const TOKEN_ENV: &str = "MIST_APITOKEN";

const KEYRING_SERVICE: &str = "mistguest";
const KEYRING_USER: &str = "api-token";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no Mist API token configured (set MIST_APITOKEN)")]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Top-level service configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mist: MistSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// How to reach the Mist cloud.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MistSettings {
    /// API host, e.g. `api.mist.com` or `api.eu.mist.com`.
    #[serde(default = "default_host")]
    pub host: String,

    /// Organization id. Resolved from the token's privileges when unset.
    pub org_id: Option<String>,

    /// API token (plaintext; prefer the environment or keyring).
    pub api_token: Option<String>,

    /// Name of an environment variable containing the API token.
    pub api_token_env: Option<String>,

    /// Path to an extra CA certificate (TLS-intercepting proxies).
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for MistSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            org_id: None,
            api_token: None,
            api_token_env: None,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

/// HTTP listener and logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    mistguest_core::config::DEFAULT_HOST.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_log_level() -> String {
    "info".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "mistguest", "mistguest").map_or_else(
        || PathBuf::from(".").join("mistguest.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Map the service's flat environment variables onto config keys.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let mapped = if key == "MIST_HOST" {
        "mist.host"
    } else if key == "MIST_ORG_ID" {
        "mist.org_id"
    } else if key == "MIST_TIMEOUT" {
        "mist.timeout"
    } else if key == "PORT" {
        "server.port"
    } else if key == "BIND_ADDRESS" {
        "server.bind_address"
    } else {
        "server.log_level"
    };
    mapped.into()
}

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::raw().only(&["org_id"]).map(|_| "mist.org_id".into()))
        .merge(
            Env::raw()
                .only(&[
                    "MIST_HOST",
                    "MIST_ORG_ID",
                    "MIST_TIMEOUT",
                    "PORT",
                    "BIND_ADDRESS",
                    "LOG_LEVEL",
                ])
                .map(env_key),
        )
}

/// Load configuration from an explicit file (or the platform default)
/// plus environment. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment_for(&path).extract()?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.mist.host.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "mist.host".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.mist.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "mist.timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        Ok(())
    }
}

// ── Credential resolution ───────────────────────────────────────────

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Walk the token chain with injectable lookups.
fn resolve_token_with(
    settings: &MistSettings,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Result<SecretString, ConfigError> {
    // 1. Configured env var name
    if let Some(val) = settings
        .api_token_env
        .as_deref()
        .and_then(&env)
        .and_then(non_blank)
    {
        return Ok(SecretString::from(val));
    }

    // 2. MIST_APITOKEN
    if let Some(val) = env(TOKEN_ENV).and_then(non_blank) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(secret) = keyring().and_then(non_blank) {
        return Ok(SecretString::from(secret));
    }

    // 4. Plaintext in config
    if let Some(token) = settings.api_token.clone().and_then(non_blank) {
        return Ok(SecretString::from(token));
    }

    Err(ConfigError::NoCredentials)
}

/// Resolve the Mist API token: `api_token_env` → `MIST_APITOKEN` →
/// keyring → plaintext in the config file.
pub fn resolve_api_token(settings: &MistSettings) -> Result<SecretString, ConfigError> {
    resolve_token_with(
        settings,
        |name| std::env::var(name).ok(),
        || {
            keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
                .ok()?
                .get_password()
                .ok()
        },
    )
}

/// Build a `PortalConfig` from settings and an already-resolved token.
pub fn to_portal_config(settings: &MistSettings, api_token: SecretString) -> PortalConfig {
    let tls = settings
        .ca_cert
        .clone()
        .map_or(TlsVerification::SystemDefaults, TlsVerification::CustomCa);

    PortalConfig {
        host: settings.host.trim().to_owned(),
        api_token,
        org_id: settings
            .org_id
            .clone()
            .filter(|id| !id.trim().is_empty()),
        tls,
        timeout: Duration::from_secs(settings.timeout),
    }
}
