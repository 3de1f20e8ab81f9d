//! Verification of webhook notifications sent by DERO Merchant.
//!
//! The service signs each notification body with the webhook secret key
//! (HMAC-SHA256, hex). Verify against the raw request bytes exactly as
//! received: re-serializing parsed JSON changes the bytes and the signature
//! will not match.

use crate::hmac;

/// Conventional header carrying the webhook signature. Where the signature
/// is read from is up to the deployment; this is only the usual name.
pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-Signature";

/// Check that `raw_body` was signed with `webhook_secret_key`.
///
/// Returns `false` for a wrong signature and also for a signature or key
/// that is not valid hex. Forged requests are expected input, not errors.
pub fn verify_webhook_signature(
    raw_body: &[u8],
    signature_header: &str,
    webhook_secret_key: &str,
) -> bool {
    let valid = hmac::verify(raw_body, signature_header, webhook_secret_key);
    if !valid {
        tracing::warn!(body_len = raw_body.len(), "webhook signature rejected");
    }
    valid
}
