//! Base64url encoding helpers.
//!
//! Token segments use the URL-safe alphabet without padding, per RFC 7515's
//! `BASE64URL(...)` definition. The decode direction exists for callers
//! (and tests) that want to peek inside a segment; the issuer itself only
//! ever encodes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes as unpadded base64url.
pub fn base64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode an unpadded base64url string.
pub fn base64url_decode(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(encoded)
}
