//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at start-up and shared immutably; restart
//! the process to pick up new secrets.

use std::env;
use tracing::warn;

use crate::signature::{ReplayGuard, SecretSet, SignatureVerifier, WebhookAuth, DEFAULT_TOLERANCE_SECS};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Secrets accepted for signature verification, newest first
    pub secrets: SecretSet,

    /// Whether to reject deliveries with a stale `X-WAREST-Timestamp`
    pub verify_timestamps: bool,

    /// Allowed clock distance for timestamps, in seconds
    pub tolerance_secs: u64,

    /// Log expected and received digests on every mismatch
    pub debug_signature: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_number("PORT", 8080),

            secrets: SecretSet::from_csv(&env::var("WAREST_SECRET").unwrap_or_default()),

            verify_timestamps: parse_flag("WAREST_VERIFY_TS"),

            tolerance_secs: match parse_number("WAREST_TOLERANCE_SEC", DEFAULT_TOLERANCE_SECS) {
                0 => DEFAULT_TOLERANCE_SECS,
                secs => secs,
            },

            debug_signature: parse_flag("DEBUG_SIGNATURE"),
        }
    }

    /// Build the authentication pipeline this configuration describes.
    pub fn webhook_auth(&self) -> WebhookAuth {
        let verifier =
            SignatureVerifier::new(self.secrets.clone()).with_debug(self.debug_signature);
        let replay = self
            .verify_timestamps
            .then(|| ReplayGuard::new(self.tolerance_secs));
        WebhookAuth::new(verifier, replay)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            secrets: SecretSet::default(),
            verify_timestamps: false,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            debug_signature: false,
        }
    }
}

/// Parse a numeric variable, warning and falling back on bad input.
fn parse_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}

/// Flags are on only when set to exactly `1`.
fn parse_flag(name: &str) -> bool {
    env::var(name).map(|v| v.trim() == "1").unwrap_or(false)
}
