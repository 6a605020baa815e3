//! TLS termination and the HTTPS accept loop.
//!
//! `rustls` (ring provider) terminates TLS; each accepted connection is served
//! on its own task by `hyper-util`'s auto builder, which negotiates HTTP/1.1 or
//! HTTP/2 from ALPN.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use rustls::ServerConfig;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info};

use crate::cert::CertPaths;

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and private key bytes.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<Arc<ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;
    if certs.is_empty() {
        anyhow::bail!("no certificate found in PEM data");
    }

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(key_pem))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let mut config =
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .context("failed to select TLS protocol versions")?
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .context("failed to build rustls ServerConfig")?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

/// Read the bootstrapped PEM files and build the server TLS configuration.
pub fn load_server_config(paths: &CertPaths) -> Result<Arc<ServerConfig>> {
    let cert_pem = std::fs::read(&paths.cert)
        .with_context(|| format!("failed to read {}", paths.cert.display()))?;
    let key_pem = std::fs::read(&paths.key)
        .with_context(|| format!("failed to read {}", paths.key.display()))?;
    build_server_config(&cert_pem, &key_pem)
}

/// Accept loop: terminate TLS on every connection and hand it to `router`.
///
/// Runs until `shutdown` resolves. Connections already accepted keep running
/// on their own tasks.
pub async fn serve<F>(
    listener: TcpListener,
    tls_config: Arc<ServerConfig>,
    router: Router,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let acceptor = TlsAcceptor::from(tls_config);
    tokio::pin!(shutdown);

    loop {
        let (tcp, peer_addr) = tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received, no longer accepting connections");
                return Ok(());
            }
            res = listener.accept() => match res {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "accept error");
                    continue;
                }
            },
        };

        debug!(%peer_addr, "accepted TCP connection");
        let acceptor = acceptor.clone();
        let router = router.clone();
        tokio::spawn(async move {
            handle_connection(acceptor, tcp, peer_addr, router).await;
        });
    }
}

/// Perform the TLS handshake and serve HTTP on one connection.
async fn handle_connection(
    acceptor: TlsAcceptor,
    tcp: TcpStream,
    peer_addr: SocketAddr,
    router: Router,
) {
    let tls = match acceptor.accept(tcp).await {
        Ok(tls) => tls,
        Err(e) => {
            // Clients that do not trust the self-signed certificate abort here.
            debug!(%peer_addr, error = %e, "TLS handshake failed");
            return;
        }
    };

    let service = TowerToHyperService::new(router);
    if let Err(e) = auto::Builder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(tls), service)
        .await
    {
        debug!(%peer_addr, error = %e, "connection closed with error");
    }
}
