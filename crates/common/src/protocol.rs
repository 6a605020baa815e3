//! Request and response bodies of the mocked `api.tdarr.io` v2 API.
//!
//! Field names follow the vendor's camelCase wire format exactly; the Tdarr
//! client inspects several of them. Request bodies are deliberately loose:
//! every field is optional and unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Placeholder used when a client omits its key or server id.
pub const UNKNOWN: &str = "unknown";

/// Placeholder used when a push notification carries no message.
pub const NO_MESSAGE: &str = "No message";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/v2/verify-key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyKeyRequest {
    pub tdarr_key: Option<String>,
}

impl VerifyKeyRequest {
    pub fn tdarr_key(&self) -> &str {
        self.tdarr_key.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Body of `POST /api/v2/user-stats/update`.
///
/// The real client sends a large statistics object alongside these two
/// fields; all of it is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStatsRequest {
    pub tdarr_key: Option<String>,
    pub server_id: Option<String>,
}

impl UserStatsRequest {
    pub fn tdarr_key(&self) -> &str {
        self.tdarr_key.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn server_id(&self) -> &str {
        self.server_id.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Body of `POST /api/v2/user-stats/push-notif`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PushNotifRequest {
    pub tdarr_key: Option<String>,
    pub message: Option<String>,
}

impl PushNotifRequest {
    pub fn tdarr_key(&self) -> &str {
        self.tdarr_key.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(NO_MESSAGE)
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// `{result, message}` acknowledgement returned by the user-stats endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: bool,
    pub message: String,
}

impl ResultResponse {
    /// A successful acknowledgement carrying `message`.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            result: true,
            message: message.into(),
        }
    }
}

/// Response body for `GET /api/v2/updater-config`.
///
/// Empty `pkgIndex` and `url` tell the client that no update is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdaterConfigResponse {
    pub pkg_index: String,
    pub url: String,
    pub message: String,
}

impl UpdaterConfigResponse {
    /// Updater configuration that disables auto-update.
    pub fn disabled() -> Self {
        Self {
            pkg_index: String::new(),
            url: String::new(),
            message: "Auto-update disabled (mock server)".into(),
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process is serving.
    pub status: String,
    /// Short identifier of this server.
    pub server: String,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfoResponse {
    /// Human-readable server name.
    pub server: String,
    pub status: String,
    /// `"<METHOD> <path>"` for every mocked vendor route.
    pub endpoints: Vec<String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Body returned for routes outside the mocked surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
