//! Parsing of the `X-WAREST-Signature` header (`<label>=<hex-digest>`).

/// A signature header split into its label and hex digest.
///
/// Only the digest takes part in verification; the label (normally the
/// algorithm token, e.g. `HMAC-SHA256`) just has to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub label: &'a str,
    pub digest: &'a str,
}

impl<'a> SignatureHeader<'a> {
    /// Split `raw` on its single `=` separator.
    ///
    /// Returns `None` when there is no separator, more than one, or when
    /// either side is empty after trimming.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (label, digest) = raw.split_once('=')?;
        if digest.contains('=') {
            return None;
        }

        let label = label.trim();
        let digest = digest.trim();
        if label.is_empty() || digest.is_empty() {
            return None;
        }

        Some(Self { label, digest })
    }
}
