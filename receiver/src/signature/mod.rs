//! Webhook signature verification.
//!
//! Deliveries carry `X-WAREST-Signature: <label>=<hex>`, an HMAC over the
//! raw body keyed with `secret || username`. The pieces, leaf first:
//!
//! ```text
//! algorithm ─┐
//! digest ────┼─> verifier (tries every secret) ─> replay (freshness, optional)
//! compare ───┘
//! ```
//!
//! Everything here is synchronous, allocation-light and free of shared
//! mutable state, so verifiers can be shared across requests behind an `Arc`.

pub mod algorithm;
pub mod compare;
pub mod digest;
pub mod header;
pub mod replay;
pub mod secrets;
pub mod verifier;

pub use algorithm::HashAlgorithm;
pub use compare::constant_time_eq;
pub use digest::hmac_hex;
pub use header::SignatureHeader;
pub use replay::{now_millis, ReplayGuard, DEFAULT_TOLERANCE_SECS};
pub use secrets::{derive_key, SecretSet, DEFAULT_SECRET};
pub use verifier::{sign, SignatureVerifier, SignedRequest, WebhookAuth};
