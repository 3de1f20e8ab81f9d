//! HMAC-SHA256 signing with hex-encoded keys.
//!
//! Signed request bodies and webhook notifications both carry a lowercase
//! hex MAC computed over the exact body bytes with the merchant's secret key.
//! Keys are handed out by the service as hex strings, so both functions take
//! the key in that form and decode it here.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::DeroMerchantError;

type HmacSha256 = Hmac<Sha256>;

/// Sign `message` with the hex-encoded `hex_key`.
///
/// Returns the 64-character lowercase hex HMAC-SHA256 digest. Fails with
/// [`DeroMerchantError::InvalidKeyEncoding`] if the key is not valid hex.
pub fn sign(message: &[u8], hex_key: &str) -> Result<String, DeroMerchantError> {
    let key = hex::decode(hex_key)
        .map_err(|e| DeroMerchantError::InvalidKeyEncoding(format!("secret key: {e}")))?;
    Ok(hex::encode(mac_bytes(&key, message)?))
}

/// Check `hex_signature` against the HMAC of `message` under `hex_key`.
///
/// Malformed hex on either the signature or the key yields `false`; this
/// never errors. The final comparison is constant-time.
pub fn verify(message: &[u8], hex_signature: &str, hex_key: &str) -> bool {
    let Ok(key) = hex::decode(hex_key) else {
        return false;
    };
    let Ok(expected) = mac_bytes(&key, message) else {
        return false;
    };

    // An undecodable signature still goes through the comparison.
    let provided = hex::decode(hex_signature).unwrap_or_default();

    constant_time_eq(&expected, &provided)
}

fn mac_bytes(key: &[u8], message: &[u8]) -> Result<Vec<u8>, DeroMerchantError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| DeroMerchantError::InvalidKeyEncoding(format!("secret key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time comparison that hides both content and length.
///
/// Both sides are hashed to fixed-length SHA-256 digests first, so a length
/// mismatch takes the same path as a content mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    ha.ct_eq(&hb).into()
}
