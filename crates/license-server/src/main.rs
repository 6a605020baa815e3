//! `license-server` — mock `api.tdarr.io` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber (and OTLP export when configured).
//! 3. Ensure a self-signed certificate/key pair exists on disk.
//! 4. Build the rustls configuration from the bootstrapped pair.
//! 5. Build the Axum router, bind the listener and serve HTTPS until Ctrl-C
//!    or SIGTERM.

mod cert;
mod config;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tracing::{info, warn};

use cert::CertPaths;
use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(
        cfg.effective_log_level(),
        cfg.log_format,
        cfg.otel_exporter_otlp_endpoint.as_deref(),
    )?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        hostname = %cfg.mock_hostname,
        debug = cfg.debug,
        "tdarr mock license server starting"
    );

    let result = run(cfg).await;
    telemetry::shutdown_telemetry();
    result
}

async fn run(cfg: Config) -> Result<()> {
    // -----------------------------------------------------------------------
    // 3. Certificate bootstrap
    // -----------------------------------------------------------------------
    let paths = cert::ensure_certificate_async(
        CertPaths::new(cfg.tls_cert_path.clone(), cfg.tls_key_path.clone()),
        cfg.mock_hostname.clone(),
    )
    .await
    .context("certificate bootstrap failed")?;

    // -----------------------------------------------------------------------
    // 4. TLS
    // -----------------------------------------------------------------------
    let tls_config = server::tls::load_server_config(&paths)?;

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::default());

    let addr = cfg.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening (HTTPS)");

    server::tls::serve(listener, tls_config, router, shutdown_signal()).await
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
