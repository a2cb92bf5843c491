//! HMAC-SHA512 signing over canonical payloads.

use super::config::HashSecret;
use crate::error::PaymentError;
use hmac::Mac;
use subtle::ConstantTimeEq;

/// Query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "vnp_SecureHash";
/// Optional sibling naming the hash algorithm; never part of the signed payload.
pub const SIGNATURE_TYPE_PARAM: &str = "vnp_SecureHashType";

/// Lower-case hex HMAC-SHA512 of `payload`.
pub fn sign(secret: &HashSecret, payload: &str) -> Result<String, PaymentError> {
    let mut mac = secret.mac()?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks `provided` against the expected signature of `payload`.
///
/// Hex case is ignored. An empty signature or an empty secret never verifies.
pub fn verify(secret: &HashSecret, payload: &str, provided: &str) -> bool {
    let provided = provided.trim();
    if provided.is_empty() || secret.is_empty() {
        return false;
    }
    let Ok(expected) = sign(secret, payload) else {
        return false;
    };
    let provided = provided.to_ascii_lowercase();
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
