//! Startup orchestration.
//!
//! # Responsibilities
//! - Load, resolve and validate configuration
//! - Initialize logging
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is served
//! - The listener binds last, once everything else is ready

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::cli::GlobalArgs;
use crate::config::{load_file, validate, ConfigError, Settings};
use crate::http::HttpServer;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::init_logging;
use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Resolve and validate settings from the command line and config file.
pub fn prepare(args: &GlobalArgs) -> Result<Settings, StartupError> {
    let file = load_file(&args.config)?;
    let from_file = file.is_some();
    let settings = Settings::resolve(args.overrides()?, file);

    init_logging(&settings.log_level);

    if from_file {
        tracing::info!(path = ?args.config, "Using config file");
    }
    if settings.secret_generated {
        tracing::debug!("Creating new secret");
    }

    validate(&settings).map_err(ConfigError::Validation)?;
    Ok(settings)
}

/// Run the agent until Ctrl+C or SIGTERM.
pub async fn run(args: GlobalArgs) -> Result<(), StartupError> {
    let settings = prepare(&args)?;
    serve(settings, shutdown_signal()).await
}

/// Bind `0.0.0.0:{port}` and serve until `shutdown` resolves.
pub async fn serve<F>(settings: Settings, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let deployment = &settings.deployment;
    tracing::info!(
        port = deployment.port,
        api_version = deployment.api_version,
        project_url = %deployment.project_url(),
        secret_generated = settings.secret_generated,
        "Configuration loaded"
    );

    let server = HttpServer::new(&settings)?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, deployment.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    server
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
