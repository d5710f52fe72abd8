//! Startup failures, rendered through miette before the process exits.

use miette::Diagnostic;
use thiserror::Error;

use mistguest_config::ConfigError;
use mistguest_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const NETWORK: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum StartupError {
    #[error("Invalid configuration")]
    #[diagnostic(
        code(mistguest::config),
        help(
            "Check the config file (see --config) and the MIST_* / PORT / BIND_ADDRESS \
             environment variables."
        )
    )]
    Config(#[source] ConfigError),

    #[error("Could not set up the Mist API client")]
    #[diagnostic(
        code(mistguest::client_setup),
        help("Check mist.host and mist.ca_cert in the config file.")
    )]
    ClientSetup(#[source] CoreError),

    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(mistguest::bind),
        help("Is another process using the port? Try --port or --bind.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error")]
    #[diagnostic(code(mistguest::serve))]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ClientSetup(_) => exit_code::CONFIG,
            Self::Bind { .. } => exit_code::NETWORK,
            Self::Serve(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
