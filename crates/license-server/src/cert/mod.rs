//! TLS certificate bootstrap.
//!
//! The Tdarr client pins nothing; it only needs `api.tdarr.io` to answer over
//! HTTPS. On startup the server makes sure a certificate/key pair exists at the
//! configured paths, generating a self-signed one the first time.
//!
//! An existing pair is reused as-is: contents are not checked, so a corrupt or
//! mismatched pair surfaces later as a TLS configuration error.

pub mod generate;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors produced while bootstrapping the certificate.
#[derive(Debug, Error)]
pub enum CertError {
    /// The RSA key pair could not be generated or encoded.
    #[error("failed to generate RSA key: {0}")]
    KeyGeneration(String),

    /// The certificate could not be assembled or signed.
    #[error("failed to build self-signed certificate: {0}")]
    Build(String),

    /// Writing a PEM file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking generation task panicked or was cancelled.
    #[error("certificate generation task failed: {0}")]
    Task(String),
}

/// Locations of the PEM certificate and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl CertPaths {
    pub fn new(cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
        }
    }

    fn both_exist(&self) -> bool {
        self.cert.exists() && self.key.exists()
    }
}

/// Ensure a certificate/key pair exists at `paths`, generating one for
/// `hostname` if either file is missing.
///
/// Returns `paths` unchanged. Blocking; see [`ensure_certificate_async`].
///
/// # Errors
///
/// Returns a [`CertError`] if generation fails or either file cannot be written.
pub fn ensure_certificate(paths: CertPaths, hostname: &str) -> Result<CertPaths, CertError> {
    if paths.both_exist() {
        info!(
            cert = %paths.cert.display(),
            key = %paths.key.display(),
            "using existing self-signed certificate"
        );
        return Ok(paths);
    }

    info!(hostname, "generating new self-signed certificate");
    let pair = generate::self_signed(hostname)?;

    write_pem(&paths.cert, &pair.cert_pem)?;
    write_pem(&paths.key, &pair.key_pem)?;

    info!(cert = %paths.cert.display(), "certificate generated");
    Ok(paths)
}

/// Run [`ensure_certificate`] on the blocking thread pool.
pub async fn ensure_certificate_async(
    paths: CertPaths,
    hostname: String,
) -> Result<CertPaths, CertError> {
    tokio::task::spawn_blocking(move || ensure_certificate(paths, &hostname))
        .await
        .map_err(|e| CertError::Task(e.to_string()))?
}

fn write_pem(path: &Path, pem: &str) -> Result<(), CertError> {
    let wrap = |source| CertError::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, pem).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use x509_cert::der::DecodePem;
    use x509_cert::Certificate;

    fn paths_in(dir: &Path) -> CertPaths {
        CertPaths::new(dir.join("server.crt"), dir.join("server.key"))
    }

    #[test]
    fn generates_pair_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ensure_certificate(paths_in(dir.path()), "api.tdarr.io").unwrap();

        let cert_pem = std::fs::read(&paths.cert).unwrap();
        let key_pem = std::fs::read_to_string(&paths.key).unwrap();
        let cert = Certificate::from_pem(&cert_pem).unwrap();
        assert_eq!(cert.tbs_certificate.subject.to_string(), "CN=api.tdarr.io");
        assert!(key_pem.contains("PRIVATE KEY"));
    }

    #[test]
    fn second_call_reuses_existing_pair() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_certificate(paths_in(dir.path()), "api.tdarr.io").unwrap();
        let cert_before = std::fs::read(&first.cert).unwrap();
        let key_before = std::fs::read(&first.key).unwrap();

        let second = ensure_certificate(paths_in(dir.path()), "api.tdarr.io").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second.cert).unwrap(), cert_before);
        assert_eq!(std::fs::read(&second.key).unwrap(), key_before);
    }

    #[test]
    fn existing_files_are_not_validated() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        std::fs::write(&paths.cert, "not a certificate").unwrap();
        std::fs::write(&paths.key, "not a key").unwrap();

        ensure_certificate(paths.clone(), "api.tdarr.io").unwrap();
        assert_eq!(std::fs::read_to_string(&paths.cert).unwrap(), "not a certificate");
        assert_eq!(std::fs::read_to_string(&paths.key).unwrap(), "not a key");
    }

    #[test]
    fn lone_certificate_triggers_regeneration() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        std::fs::write(&paths.cert, "stale").unwrap();

        ensure_certificate(paths.clone(), "api.tdarr.io").unwrap();
        let cert_pem = std::fs::read_to_string(&paths.cert).unwrap();
        assert!(cert_pem.starts_with("-----BEGIN CERTIFICATE-----"));
        assert!(paths.key.exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(&dir.path().join("nested/tls"));
        ensure_certificate(paths.clone(), "localhost").unwrap();
        assert!(paths.cert.exists() && paths.key.exists());
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        // A regular file cannot act as a parent directory.
        let paths = paths_in(&blocker);
        let err = ensure_certificate(paths, "localhost").unwrap_err();
        assert!(matches!(err, CertError::Write { .. }));
    }

    #[tokio::test]
    async fn async_wrapper_generates_pair() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ensure_certificate_async(paths_in(dir.path()), "api.tdarr.io".into())
            .await
            .unwrap();
        assert!(paths.cert.exists() && paths.key.exists());
    }
}
