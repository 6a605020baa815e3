//! Axum middleware settings applied to the router.

use std::time::Duration;

/// Per-request timeout applied to all routes. Handlers finish instantly; this
/// only bounds slow clients trickling in a request body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
