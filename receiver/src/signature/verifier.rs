//! Signature verification across a rotating set of secrets.

use tracing::{debug, warn};

use super::algorithm::HashAlgorithm;
use super::compare::constant_time_eq;
use super::digest::hmac_hex;
use super::header::SignatureHeader;
use super::replay::ReplayGuard;
use super::secrets::{derive_key, SecretSet};
use crate::error::RejectReason;

/// The parts of an inbound delivery that take part in authentication.
///
/// Absent headers are represented as empty strings, except the timestamp
/// which only matters when freshness checks are on.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    /// `X-WAREST-Signature`, `<label>=<hex-digest>`
    pub signature: &'a str,
    /// `X-WAREST-Signature-Alg`
    pub algorithm: &'a str,
    /// `X-WAREST-Username`
    pub username: &'a str,
    /// `X-WAREST-Timestamp`
    pub timestamp: Option<&'a str>,
    /// Body exactly as received
    pub body: &'a [u8],
}

/// Checks request signatures against every configured secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secrets: SecretSet,
    debug: bool,
}

impl SignatureVerifier {
    pub fn new(secrets: SecretSet) -> Self {
        Self {
            secrets,
            debug: false,
        }
    }

    /// Log both digests for every secret that fails to match.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn secrets(&self) -> &SecretSet {
        &self.secrets
    }

    /// Verify a request's signature.
    ///
    /// Returns `true` as soon as any secret (keyed with the username)
    /// reproduces the supplied digest. A malformed signature header fails
    /// without computing anything. Callers only learn pass or fail, never
    /// which part was wrong.
    pub fn verify(&self, request: &SignedRequest<'_>) -> bool {
        let header = match SignatureHeader::parse(request.signature) {
            Some(h) => h,
            None => {
                warn!(
                    has_signature = !request.signature.is_empty(),
                    "signature_header_malformed"
                );
                return false;
            }
        };

        let algorithm = HashAlgorithm::from_header(request.algorithm);

        for (index, secret) in self.secrets.iter().enumerate() {
            let key = derive_key(secret, request.username);
            let expected = match hmac_hex(algorithm, &key, request.body) {
                Ok(d) => d,
                Err(_) => {
                    warn!(secret_index = index, "signature_invalid_key");
                    continue;
                }
            };

            if constant_time_eq(&expected, header.digest) {
                debug!(
                    algorithm = %algorithm,
                    secret_index = index,
                    "signature_verified"
                );
                return true;
            }

            if self.debug {
                warn!(
                    secret_index = index,
                    expected = %expected,
                    received = %header.digest,
                    "signature_secret_mismatch"
                );
            }
        }

        warn!(
            algorithm = %algorithm,
            label = %header.label,
            secrets_tried = self.secrets.len(),
            expected_length = algorithm.hex_len(),
            actual_length = header.digest.len(),
            "signature_mismatch"
        );
        false
    }
}

/// Full authentication pipeline for a delivery: signature, then freshness.
#[derive(Debug, Clone)]
pub struct WebhookAuth {
    verifier: SignatureVerifier,
    replay: Option<ReplayGuard>,
}

impl WebhookAuth {
    /// `replay` is `None` when timestamp verification is disabled.
    pub fn new(verifier: SignatureVerifier, replay: Option<ReplayGuard>) -> Self {
        Self { verifier, replay }
    }

    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    pub fn replay_guard(&self) -> Option<&ReplayGuard> {
        self.replay.as_ref()
    }

    /// Authenticate a request at wall-clock time `now_ms`.
    ///
    /// The freshness check only runs after the signature has verified, so
    /// a bad signature is always reported as such.
    pub fn authenticate(
        &self,
        request: &SignedRequest<'_>,
        now_ms: i64,
    ) -> Result<(), RejectReason> {
        if !self.verifier.verify(request) {
            return Err(RejectReason::BadSignature);
        }

        if let Some(guard) = &self.replay {
            if !guard.is_fresh(request.timestamp, now_ms) {
                return Err(RejectReason::StaleTimestamp);
            }
        }

        Ok(())
    }
}

/// Produce the `X-WAREST-Signature` value a sender attaches to `body`.
///
/// Mirrors the sender side: the key is `secret` followed by `username`
/// and the label is the algorithm token, e.g. `HMAC-SHA256=<hex>`.
pub fn sign(
    algorithm: HashAlgorithm,
    secret: &str,
    username: &str,
    body: &[u8],
) -> Result<String, hmac::digest::InvalidLength> {
    let digest = hmac_hex(algorithm, &derive_key(secret, username), body)?;
    Ok(format!("{}={}", algorithm.header_token(), digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PING_BODY: &[u8] = br#"{"event":"ping"}"#;
    const NOW: i64 = 1_760_000_000_000;

    fn request<'a>(
        signature: &'a str,
        algorithm: &'a str,
        username: &'a str,
        body: &'a [u8],
    ) -> SignedRequest<'a> {
        SignedRequest {
            signature,
            algorithm,
            username,
            timestamp: None,
            body,
        }
    }

    fn verifier(secrets: &[&str]) -> SignatureVerifier {
        SignatureVerifier::new(SecretSet::new(
            secrets.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_verify_ping_default_algorithm() {
        let digest = hmac_hex(HashAlgorithm::Sha256, b"abc123", PING_BODY).unwrap();
        assert_eq!(
            digest,
            "64a2180b7c3949f76a6886434ca7216adc87571dcd85290b0fd3a436b3107223"
        );

        let verifier = verifier(&["abc123"]);
        let header = format!("sig={}", digest);
        assert!(verifier.verify(&request(&header, "", "", PING_BODY)));

        let mut tampered = digest.into_bytes();
        tampered[10] = if tampered[10] == b'0' { b'1' } else { b'0' };
        let header = format!("sig={}", String::from_utf8(tampered).unwrap());
        assert!(!verifier.verify(&request(&header, "", "", PING_BODY)));
    }

    #[test]
    fn test_verify_rotation_any_secret_matches() {
        let signature = sign(HashAlgorithm::Sha256, "s2", "bob", PING_BODY).unwrap();

        let rotating = verifier(&["s1", "s2"]);
        assert!(rotating.verify(&request(&signature, "HMAC-SHA256", "bob", PING_BODY)));

        let reversed = verifier(&["s2", "s1"]);
        assert!(reversed.verify(&request(&signature, "HMAC-SHA256", "bob", PING_BODY)));

        let old_only = verifier(&["s1"]);
        assert!(!old_only.verify(&request(&signature, "HMAC-SHA256", "bob", PING_BODY)));
    }

    #[test]
    fn test_verify_username_is_part_of_key() {
        let signature = sign(HashAlgorithm::Sha256, "s2", "bob", PING_BODY).unwrap();
        let verifier = verifier(&["s2"]);
        assert!(!verifier.verify(&request(&signature, "", "", PING_BODY)));
        assert!(!verifier.verify(&request(&signature, "", "alice", PING_BODY)));
        assert!(verifier.verify(&request(&signature, "", "bob", PING_BODY)));
    }

    #[test]
    fn test_verify_each_algorithm() {
        let verifier = verifier(&["secret"]);
        for algorithm in [
            HashAlgorithm::Sha224,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            let signature = sign(algorithm, "secret", "", PING_BODY).unwrap();
            assert!(verifier.verify(&request(
                &signature,
                algorithm.header_token(),
                "",
                PING_BODY
            )));
            let lowercase = algorithm.header_token().to_lowercase();
            assert!(verifier.verify(&request(&signature, &lowercase, "", PING_BODY)));
        }
    }

    #[test]
    fn test_verify_algorithm_mismatch_fails() {
        let verifier = verifier(&["secret"]);
        let signature = sign(HashAlgorithm::Sha512, "secret", "", PING_BODY).unwrap();
        assert!(!verifier.verify(&request(&signature, "HMAC-SHA256", "", PING_BODY)));
        // Unknown algorithm header falls back to SHA-256.
        assert!(!verifier.verify(&request(&signature, "HMAC-SHA999", "", PING_BODY)));

        let sha256 = sign(HashAlgorithm::Sha256, "secret", "", PING_BODY).unwrap();
        assert!(verifier.verify(&request(&sha256, "HMAC-SHA999", "", PING_BODY)));
    }

    #[test]
    fn test_verify_exact_body_bytes() {
        let verifier = verifier(&["secret"]);
        let signature = sign(HashAlgorithm::Sha256, "secret", "", PING_BODY).unwrap();
        assert!(!verifier.verify(&request(&signature, "", "", br#"{"event": "ping"}"#)));
        assert!(!verifier.verify(&request(&signature, "", "", b"")));
    }

    #[test]
    fn test_verify_malformed_header() {
        let verifier = verifier(&["secret"]);
        let digest = hmac_hex(HashAlgorithm::Sha256, b"secret", PING_BODY).unwrap();
        assert!(!verifier.verify(&request("", "", "", PING_BODY)));
        assert!(!verifier.verify(&request(&digest, "", "", PING_BODY)));
        assert!(!verifier.verify(&request("HMAC-SHA256=", "", "", PING_BODY)));
        assert!(!verifier.verify(&request(&format!("={}", digest), "", "", PING_BODY)));
    }

    #[test]
    fn test_verify_uppercase_digest_rejected() {
        let verifier = verifier(&["secret"]);
        let digest = hmac_hex(HashAlgorithm::Sha256, b"secret", PING_BODY).unwrap();
        let header = format!("sig={}", digest.to_uppercase());
        assert!(!verifier.verify(&request(&header, "", "", PING_BODY)));
    }

    #[test]
    fn test_sign_format() {
        let signature = sign(HashAlgorithm::Sha384, "abc", "", b"x").unwrap();
        let (label, digest) = signature.split_once('=').unwrap();
        assert_eq!(label, "HMAC-SHA384");
        assert_eq!(digest.len(), 96);
    }

    #[test]
    fn test_authenticate_signature_before_timestamp() {
        let auth = WebhookAuth::new(verifier(&["secret"]), Some(ReplayGuard::new(300)));
        let req = SignedRequest {
            signature: "sig=00",
            algorithm: "",
            username: "",
            timestamp: None,
            body: PING_BODY,
        };
        assert_eq!(auth.authenticate(&req, NOW), Err(RejectReason::BadSignature));
    }

    #[test]
    fn test_authenticate_timestamp() {
        let auth = WebhookAuth::new(verifier(&["secret"]), Some(ReplayGuard::new(300)));
        let signature = sign(HashAlgorithm::Sha256, "secret", "", PING_BODY).unwrap();

        let fresh = (NOW - 299_000).to_string();
        let stale = (NOW - 301_000).to_string();
        let mut req = SignedRequest {
            signature: &signature,
            algorithm: "HMAC-SHA256",
            username: "",
            timestamp: Some(&fresh),
            body: PING_BODY,
        };
        assert_eq!(auth.authenticate(&req, NOW), Ok(()));

        req.timestamp = Some(&stale);
        assert_eq!(auth.authenticate(&req, NOW), Err(RejectReason::StaleTimestamp));

        req.timestamp = None;
        assert_eq!(auth.authenticate(&req, NOW), Err(RejectReason::StaleTimestamp));
    }

    #[test]
    fn test_authenticate_without_replay_guard() {
        let auth = WebhookAuth::new(verifier(&["secret"]), None);
        let signature = sign(HashAlgorithm::Sha256, "secret", "", PING_BODY).unwrap();
        let req = SignedRequest {
            signature: &signature,
            algorithm: "",
            username: "",
            timestamp: None,
            body: PING_BODY,
        };
        assert_eq!(auth.authenticate(&req, NOW), Ok(()));
        assert!(auth.replay_guard().is_none());
    }
}
