//! Shared application state injected into every Axum handler.

use std::sync::Arc;

/// Name reported by `GET /`.
pub const DEFAULT_DISPLAY_NAME: &str = "Tdarr Mock License Server";

/// Identifier reported by `GET /health`.
pub const DEFAULT_SERVER_ID: &str = "mock-license-server";

/// Immutable identity strings shared across all request handlers.
///
/// Cloned per request by Axum; both fields are `Arc`-backed.
#[derive(Clone, Debug)]
pub struct AppState {
    pub display_name: Arc<str>,
    pub server_id: Arc<str>,
}

impl AppState {
    pub fn new(display_name: impl Into<Arc<str>>, server_id: impl Into<Arc<str>>) -> Self {
        Self {
            display_name: display_name.into(),
            server_id: server_id.into(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_NAME, DEFAULT_SERVER_ID)
    }
}
