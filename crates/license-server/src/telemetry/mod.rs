//! Structured logging and optional OpenTelemetry span export.
//!
//! # Telemetry invariants
//!
//! - At most the first 8 characters of a license key or server id appear in
//!   any log field.
//! - The default filter comes from `LOG_LEVEL` (or `debug` when `DEBUG=true`);
//!   `RUST_LOG` takes precedence over both.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
