//! Hash family selection from the `X-WAREST-Signature-Alg` header.

use std::fmt;

/// Prefix every algorithm token carries on the wire, e.g. `HMAC-SHA384`.
const HEADER_PREFIX: &str = "HMAC-SHA";

/// SHA-2 family used for the keyed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Resolve the algorithm named by a request header.
    ///
    /// Resolution is total: casing is ignored, the `HMAC-SHA` prefix is
    /// stripped, and anything that is not exactly 224, 256, 384 or 512
    /// afterwards (including an empty or missing header) resolves to
    /// SHA-256. Senders with slightly malformed headers keep working, at
    /// the price of possibly verifying with a different family than they
    /// meant to use.
    pub fn from_header(header: &str) -> Self {
        let normalized = header.trim().to_ascii_uppercase();
        let bits = match normalized.strip_prefix(HEADER_PREFIX) {
            Some(bits) => bits,
            None => return Self::default(),
        };

        match bits {
            "224" => Self::Sha224,
            "256" => Self::Sha256,
            "384" => Self::Sha384,
            "512" => Self::Sha512,
            _ => Self::default(),
        }
    }

    /// Lowercase name, matching what most HMAC libraries call the digest.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Token the sender puts in `X-WAREST-Signature-Alg` and as the
    /// signature label.
    pub fn header_token(&self) -> &'static str {
        match self {
            Self::Sha224 => "HMAC-SHA224",
            Self::Sha256 => "HMAC-SHA256",
            Self::Sha384 => "HMAC-SHA384",
            Self::Sha512 => "HMAC-SHA512",
        }
    }

    /// Raw digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Digest length once hex encoded.
    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
