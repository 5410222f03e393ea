//! WARest webhook receiver.
//!
//! Verifies signed webhook deliveries and answers them with JSON:
//! - `signature`: HMAC verification with secret rotation and a timestamp
//!   freshness check
//! - `reply`: envelope parsing and reply actions for accepted deliveries
//! - `web`: the axum handlers tying the two together
//!
//! ## Request flow
//!
//! ```text
//! POST /webhook → signature (any secret) → freshness (optional) → reply
//! ```

pub mod config;
pub mod error;
pub mod reply;
pub mod signature;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::RejectReason;
pub use signature::{
    sign, HashAlgorithm, ReplayGuard, SecretSet, SignatureVerifier, SignedRequest, WebhookAuth,
};
pub use web::{router, AppState};
