//! Axum request handlers for the mocked `api.tdarr.io` endpoints.
//!
//! Every handler answers success. Nothing is validated or stored; request
//! bodies are only read for log context.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use common::protocol::{
    ErrorResponse, HealthResponse, PushNotifRequest, ResultResponse, ServerInfoResponse,
    UpdaterConfigResponse, UserStatsRequest, VerifyKeyRequest,
};
use tracing::info;

use super::extract::LenientJson;
use super::state::AppState;

/// Number of leading characters of a key or server id that may be logged.
const LOG_PREFIX_CHARS: usize = 8;

/// Vendor routes advertised by `GET /`.
pub const ENDPOINTS: [&str; 5] = [
    "POST /api/v2/verify-key",
    "POST /api/v2/user-stats/update",
    "POST /api/v2/user-stats/push-notif",
    "GET /api/v2/updater-config",
    "GET /api/v2/download-plugins",
];

/// `POST /api/v2/verify-key` — accept any license key.
///
/// The client checks `status === 200 && data === true`, so the body must be
/// the bare JSON literal `true`, not an object.
pub async fn verify_key(LenientJson(req): LenientJson<VerifyKeyRequest>) -> Json<bool> {
    info!(key_prefix = log_prefix(req.tdarr_key()), "license verification request");
    Json(true)
}

/// `POST /api/v2/user-stats/update` — accept and discard usage statistics.
pub async fn update_stats(LenientJson(req): LenientJson<UserStatsRequest>) -> Json<ResultResponse> {
    info!(server_prefix = log_prefix(req.server_id()), "stats update");
    Json(ResultResponse::ok("Statistics updated (mock server)"))
}

/// `POST /api/v2/user-stats/push-notif` — log the notification, send nothing.
pub async fn push_notification(
    LenientJson(req): LenientJson<PushNotifRequest>,
) -> Json<ResultResponse> {
    info!(notification = req.message(), "push notification");
    Json(ResultResponse::ok("Notification sent (mock server)"))
}

/// `GET /api/v2/updater-config` — report that no update is available.
pub async fn updater_config() -> Json<UpdaterConfigResponse> {
    info!("updater config requested");
    Json(UpdaterConfigResponse::disabled())
}

/// `GET /api/v2/download-plugins` — empty `200` so local plugins are never overwritten.
pub async fn download_plugins() -> StatusCode {
    info!("plugin download requested (skipped)");
    StatusCode::OK
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        server: state.server_id.to_string(),
    })
}

/// `GET /` — self-description.
pub async fn root(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        server: state.display_name.to_string(),
        status: "running".into(),
        endpoints: ENDPOINTS.iter().map(|e| (*e).to_owned()).collect(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// First [`LOG_PREFIX_CHARS`] characters of `value`, split on a char boundary.
fn log_prefix(value: &str) -> &str {
    match value.char_indices().nth(LOG_PREFIX_CHARS) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn test_server() -> TestServer {
        let app = Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .with_state(AppState::new("Test Server", "test-id"));
        TestServer::new(app).unwrap()
    }

    #[test]
    fn log_prefix_truncates_to_eight_chars() {
        assert_eq!(log_prefix("abcd1234efgh"), "abcd1234");
        assert_eq!(log_prefix("short"), "short");
        assert_eq!(log_prefix(""), "");
    }

    #[test]
    fn log_prefix_respects_char_boundaries() {
        assert_eq!(log_prefix("ééééééééé"), "éééééééé");
    }

    #[tokio::test]
    async fn health_reports_configured_server_id() {
        let resp = test_server().get("/health").await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<Value>(), json!({"status": "healthy", "server": "test-id"}));
    }

    #[tokio::test]
    async fn root_lists_vendor_routes() {
        let resp = test_server().get("/").await;
        resp.assert_status_ok();
        let body: ServerInfoResponse = resp.json();
        assert_eq!(body.server, "Test Server");
        assert_eq!(body.status, "running");
        assert_eq!(body.endpoints, ENDPOINTS);
    }
}
