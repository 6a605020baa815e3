//! Axum HTTPS server, routing, and middleware.
//!
//! # Responsibilities
//! - Terminate TLS with the bootstrapped self-signed certificate.
//! - Define the Axum router with the mocked vendor routes and shared middleware.
//! - Decode request bodies leniently so no request is ever rejected.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;
