//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/api/v2/verify-key", post(handlers::verify_key))
        .route("/api/v2/user-stats/update", post(handlers::update_stats))
        .route("/api/v2/user-stats/push-notif", post(handlers::push_notification))
        .route("/api/v2/updater-config", get(handlers::updater_config))
        .route("/api/v2/download-plugins", get(handlers::download_plugins))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::root))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .with_state(state)
}
