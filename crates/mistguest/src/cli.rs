//! Command-line flags for the `mistguest` service.

use std::path::PathBuf;

use clap::Parser;

/// mistguest -- guest pre-authorization backend for Juniper Mist
#[derive(Debug, Parser)]
#[command(
    name = "mistguest",
    version,
    about = "Serve the Mist guest pre-authorization API",
    long_about = "HTTP backend for pre-authorizing guest devices on Mist WLANs.\n\n\
        Reads the API token from MIST_APITOKEN (or the system keyring) and\n\
        optional settings from a TOML config file."
)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "MISTGUEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen port (overrides config and PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides config and BIND_ADDRESS)
    #[arg(long)]
    pub bind: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
