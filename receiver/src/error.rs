//! Rejection reasons surfaced to webhook senders.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a delivery was refused.
///
/// A wrong secret, wrong algorithm or wrong username all surface as
/// `BadSignature`. A stale timestamp is only reported once the signature
/// has verified.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("bad signature")]
    BadSignature,

    #[error("stale timestamp")]
    StaleTimestamp,
}

impl RejectReason {
    pub fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

/// Body sent with a rejection: `{"ok":false,"error":"..."}`.
#[derive(Debug, Serialize)]
pub struct RejectBody {
    pub ok: bool,
    pub error: String,
}

impl IntoResponse for RejectReason {
    fn into_response(self) -> Response {
        let body = RejectBody {
            ok: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
