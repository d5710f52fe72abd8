mod cli;
mod startup;

use clap::Parser;
use secrecy::SecretString;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mistguest::{AppState, router};
use mistguest_config::ConfigError;
use mistguest_core::Portal;

use crate::cli::Cli;
use crate::startup::StartupError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `-v` flags win over the configured level; `RUST_LOG` wins over both.
fn init_tracing(verbosity: u8, log_level: &str) {
    let filter = match verbosity {
        0 => log_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let mut config = mistguest_config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    init_tracing(cli.verbose, &config.server.log_level);

    let api_token = match mistguest_config::resolve_api_token(&config.mist) {
        Ok(token) => token,
        Err(ConfigError::NoCredentials) => {
            warn!("MIST_APITOKEN not set; Mist API calls will fail until a token is configured");
            SecretString::from(String::new())
        }
        Err(e) => return Err(e.into()),
    };

    let portal = Portal::connect(&mistguest_config::to_portal_config(&config.mist, api_token))
        .map_err(StartupError::ClientSetup)?;
    let app = router(AppState::new(portal));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, host = %config.mist.host, "mistguest listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
