//! Timestamp freshness check for signed deliveries.
//!
//! This bounds how long a captured request stays usable; it does not
//! remember what it has seen, so an identical request replayed inside the
//! window is still accepted. Closing that gap needs persisted nonce state
//! and a sender-side change.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

/// Tolerance applied when none (or zero) is configured.
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Rejects deliveries whose `X-WAREST-Timestamp` is too far from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayGuard {
    tolerance_secs: u64,
}

impl ReplayGuard {
    /// Create a guard; a tolerance of zero means [`DEFAULT_TOLERANCE_SECS`].
    pub fn new(tolerance_secs: u64) -> Self {
        let tolerance_secs = if tolerance_secs == 0 {
            DEFAULT_TOLERANCE_SECS
        } else {
            tolerance_secs
        };
        Self { tolerance_secs }
    }

    pub fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
    }

    /// Check a raw timestamp header (milliseconds since epoch) against `now_ms`.
    ///
    /// Missing, unparseable and zero timestamps are all stale. Timestamps
    /// from the future are judged by the same absolute distance.
    pub fn is_fresh(&self, timestamp: Option<&str>, now_ms: i64) -> bool {
        let timestamp_ms = timestamp.map(parse_timestamp).unwrap_or(0);
        if timestamp_ms == 0 {
            warn!(has_timestamp = timestamp.is_some(), "timestamp_missing");
            return false;
        }

        let skew_ms = now_ms.abs_diff(timestamp_ms);
        let tolerance_ms = self.tolerance_secs.saturating_mul(1000);
        if skew_ms > tolerance_ms {
            warn!(
                timestamp_ms = timestamp_ms,
                now_ms = now_ms,
                skew_ms = skew_ms,
                tolerance_secs = self.tolerance_secs,
                "timestamp_stale"
            );
            return false;
        }

        true
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_SECS)
    }
}

/// Parse a millisecond timestamp header; anything unparseable becomes 0.
pub fn parse_timestamp(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
