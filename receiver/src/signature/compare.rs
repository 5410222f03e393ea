//! Constant-time digest comparison.

/// Compare two hex digests without exiting early on the first mismatch.
///
/// Unequal lengths return immediately; digest lengths are fixed per
/// algorithm and not secret. Equal-length inputs are always scanned in
/// full, OR-ing the XOR of every byte pair into one accumulator.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    diff == 0
}
