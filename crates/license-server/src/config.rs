//! Configuration loading and validation for the mock license server.
//!
//! Every value has a default, so the server starts with an empty environment.
//! Overrides are read from environment variables at startup; the process exits
//! with a clear error message if any of them is invalid.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Validated server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IP address the HTTPS listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the HTTPS listener binds to. The Tdarr client always dials 443.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// Where the PEM certificate is cached between restarts.
    #[serde(default = "default_tls_cert_path")]
    pub tls_cert_path: PathBuf,

    /// Where the PEM private key is cached between restarts.
    #[serde(default = "default_tls_key_path")]
    pub tls_key_path: PathBuf,

    /// Hostname written into the generated certificate.
    #[serde(default = "default_mock_hostname")]
    pub mock_hostname: String,

    /// Default tracing filter (e.g. `"info"`, `"debug"`). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Verbose mode: forces the default filter to `debug`.
    #[serde(default)]
    pub debug: bool,

    /// Optional OTLP endpoint. Spans are only exported when this is set.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".into()
}
fn default_tls_port() -> u16 {
    443
}
fn default_tls_cert_path() -> PathBuf {
    std::env::temp_dir().join("server.crt")
}
fn default_tls_key_path() -> PathBuf {
    std::env::temp_dir().join("server.key")
}
fn default_mock_hostname() -> String {
    "api.tdarr.io".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed or
    /// fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_builder(config::Config::builder().add_source(config::Environment::default()))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Socket address of the HTTPS listener.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not an IP address: {:?}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.tls_port))
    }

    /// Filter directive handed to the subscriber when `RUST_LOG` is unset.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.tls_port == 0 {
            anyhow::bail!("TLS_PORT must be > 0");
        }
        ensure_non_empty(&self.mock_hostname, "MOCK_HOSTNAME")?;
        ensure_non_empty(&self.log_level, "LOG_LEVEL")?;
        ensure_non_empty(&self.tls_cert_path.to_string_lossy(), "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path.to_string_lossy(), "TLS_KEY_PATH")?;
        if self.tls_cert_path == self.tls_key_path {
            anyhow::bail!("TLS_CERT_PATH and TLS_KEY_PATH must differ");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            ensure_non_empty(endpoint, "OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}
