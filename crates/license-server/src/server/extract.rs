//! Lenient JSON body extractor.
//!
//! The vendor client is not always careful about bodies or content types, and
//! the mock must answer success regardless. [`LenientJson`] never rejects: an
//! absent, empty, non-JSON or wrongly-shaped body yields `T::default()`.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

/// JSON body decoded with a fallback to `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Bytes::from_request(req, state).await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "unreadable request body, using defaults");
                return Ok(Self(T::default()));
            }
        };
        Ok(Self(decode_or_default(&body)))
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "malformed request body, using defaults");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::{PushNotifRequest, UserStatsRequest, VerifyKeyRequest};

    #[test]
    fn decodes_well_formed_body() {
        let req: VerifyKeyRequest = decode_or_default(br#"{"tdarrKey": "abcd1234"}"#);
        assert_eq!(req.tdarr_key(), "abcd1234");
    }

    #[test]
    fn empty_body_defaults() {
        let req: UserStatsRequest = decode_or_default(b"");
        assert_eq!(req.server_id(), "unknown");
        let req: UserStatsRequest = decode_or_default(b" \n");
        assert_eq!(req.server_id(), "unknown");
    }

    #[test]
    fn malformed_json_defaults() {
        let req: PushNotifRequest = decode_or_default(b"{\"message\": ");
        assert_eq!(req.message(), "No message");
    }

    #[test]
    fn wrong_shape_defaults() {
        let req: VerifyKeyRequest = decode_or_default(b"[1, 2, 3]");
        assert_eq!(req.tdarr_key(), "unknown");
        let req: VerifyKeyRequest = decode_or_default(br#"{"tdarrKey": 42}"#);
        assert_eq!(req.tdarr_key(), "unknown");
    }
}
