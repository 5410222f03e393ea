//! Web server module for receiving WARest webhook deliveries.
//!
//! This module provides a small axum server that:
//! - Authenticates each delivery by its HMAC signature
//! - Optionally rejects deliveries with stale timestamps
//! - Replies with JSON, optionally carrying actions for the sender

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, warest_webhook, AppState, HealthResponse};

/// Build the receiver's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(warest_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
