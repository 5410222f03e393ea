//! Webhook endpoint handlers.
//!
//! The webhook handler:
//! 1. Authenticates the raw body against the signature headers
//! 2. Parses the envelope only once authentication has passed
//! 3. Answers with a pong or a (possibly empty) list of reply actions

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::RejectReason;
use crate::reply::{build_reply, Envelope, WebhookReply};
use crate::signature::{now_millis, SignedRequest, WebhookAuth};
use crate::Config;

pub const SIGNATURE_HEADER: &str = "x-warest-signature";
pub const SIGNATURE_ALG_HEADER: &str = "x-warest-signature-alg";
pub const USERNAME_HEADER: &str = "x-warest-username";
pub const TIMESTAMP_HEADER: &str = "x-warest-timestamp";
pub const EVENT_HEADER: &str = "x-warest-event";
pub const SESSION_HEADER: &str = "x-warest-session";
pub const EVENT_ID_HEADER: &str = "x-warest-event-id";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<WebhookAuth>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let auth = config.webhook_auth();
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// WARest Webhook
// =============================================================================

/// WARest webhook endpoint.
///
/// The body is taken as raw bytes: the signature covers exactly what was
/// sent, so nothing may be decoded or re-encoded before verification.
pub async fn warest_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookReply>, RejectReason> {
    let event_header = header_str(&headers, EVENT_HEADER);

    info!(
        event = event_header.unwrap_or_default(),
        session = header_str(&headers, SESSION_HEADER).unwrap_or_default(),
        event_id = header_str(&headers, EVENT_ID_HEADER).unwrap_or_default(),
        body_length = body.len(),
        has_signature = headers.contains_key(SIGNATURE_HEADER),
        "webhook_received"
    );

    let request = SignedRequest {
        signature: header_str(&headers, SIGNATURE_HEADER).unwrap_or_default(),
        algorithm: header_str(&headers, SIGNATURE_ALG_HEADER).unwrap_or_default(),
        username: header_str(&headers, USERNAME_HEADER).unwrap_or_default(),
        timestamp: header_str(&headers, TIMESTAMP_HEADER),
        body: &body,
    };

    if let Err(reason) = state.auth.authenticate(&request, now_millis()) {
        warn!(reason = %reason, "webhook_rejected");
        return Err(reason);
    }

    let envelope = Envelope::from_body(&body);
    let event = event_header
        .filter(|e| !e.is_empty())
        .or(envelope.event.as_deref())
        .unwrap_or_default();

    let reply = build_reply(event, &envelope);

    info!(
        event = event,
        session = envelope.session_id().unwrap_or_default(),
        action_count = reply.actions.as_ref().map(|a| a.len()).unwrap_or(0),
        "webhook_accepted"
    );

    Ok(Json(reply))
}

/// Header value as UTF-8, if present and valid.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_str() {
        let mut headers = HeaderMap::new();
        headers.insert(USERNAME_HEADER, HeaderValue::from_static("bob"));
        headers.insert(EVENT_HEADER, HeaderValue::from_bytes(b"\xffbad").unwrap());

        assert_eq!(header_str(&headers, "X-WAREST-Username"), Some("bob"));
        assert_eq!(header_str(&headers, EVENT_HEADER), None);
        assert_eq!(header_str(&headers, SIGNATURE_HEADER), None);
    }

    #[test]
    fn test_app_state_from_config() {
        let state = AppState::new(Config {
            verify_timestamps: true,
            ..Config::default()
        });
        assert!(state.auth.replay_guard().is_some());
        assert!(state.config.verify_timestamps);
    }
}
