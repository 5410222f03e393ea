//! Keyed digest computation (RFC 2104 HMAC over SHA-2).

use hmac::digest::{InvalidLength, KeyInit};
use hmac::{Hmac, Mac};
use sha2::{Sha224, Sha256, Sha384, Sha512};

use super::algorithm::HashAlgorithm;

type HmacSha224 = Hmac<Sha224>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the lowercase hex HMAC of `message` under `key`.
///
/// The output is byte-for-byte what any standard HMAC implementation
/// produces for the same family, key and message, which is what lets
/// senders written in other languages interoperate.
///
/// HMAC accepts keys of any length, so the error arm only exists because
/// the underlying constructor is fallible in general.
pub fn hmac_hex(
    algorithm: HashAlgorithm,
    key: &[u8],
    message: &[u8],
) -> Result<String, InvalidLength> {
    match algorithm {
        HashAlgorithm::Sha224 => keyed_hex::<HmacSha224>(key, message),
        HashAlgorithm::Sha256 => keyed_hex::<HmacSha256>(key, message),
        HashAlgorithm::Sha384 => keyed_hex::<HmacSha384>(key, message),
        HashAlgorithm::Sha512 => keyed_hex::<HmacSha512>(key, message),
    }
}

fn keyed_hex<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = <M as KeyInit>::new_from_slice(key)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
