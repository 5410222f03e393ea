//! The ordered set of shared secrets accepted during rotation.

/// Secret used when `WAREST_SECRET` is empty or unset.
pub const DEFAULT_SECRET: &str = "secret";

/// Ordered, immutable list of secrets a signature may have been made with.
///
/// Keeping the old and new secret side by side lets senders switch over
/// without a window of rejected deliveries. Put the newest secret first;
/// order only affects how many digests a typical request costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSet {
    secrets: Vec<String>,
}

impl SecretSet {
    /// Build a set from explicit secrets, falling back to [`DEFAULT_SECRET`]
    /// when none are given.
    pub fn new(secrets: Vec<String>) -> Self {
        if secrets.is_empty() {
            return Self::default();
        }
        Self { secrets }
    }

    /// Parse a comma-delimited list such as `"new-secret, old-secret"`.
    ///
    /// Entries are trimmed and empty entries dropped.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.secrets.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl Default for SecretSet {
    fn default() -> Self {
        Self {
            secrets: vec![DEFAULT_SECRET.to_string()],
        }
    }
}

/// Per-request HMAC key: the secret immediately followed by the username.
///
/// There is no separator or length prefix, so `("ab", "c")` and
/// `("a", "bc")` derive the same key. Senders compute it the same way,
/// so this cannot change without breaking them.
pub fn derive_key(secret: &str, username: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(secret.len() + username.len());
    key.extend_from_slice(secret.as_bytes());
    key.extend_from_slice(username.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv() {
        let set = SecretSet::from_csv("new, old ,,  ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["new", "old"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_csv_empty_falls_back() {
        for raw in ["", "  ", ",", " , ,"] {
            let set = SecretSet::from_csv(raw);
            assert_eq!(set.iter().collect::<Vec<_>>(), vec![DEFAULT_SECRET]);
        }
        assert!(!SecretSet::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_derive_key_concatenates() {
        assert_eq!(derive_key("abc123", ""), b"abc123".to_vec());
        assert_eq!(derive_key("s2", "bob"), b"s2bob".to_vec());
        // No delimiter: distinct pairs can collide.
        assert_eq!(derive_key("ab", "c"), derive_key("a", "bc"));
    }
}
