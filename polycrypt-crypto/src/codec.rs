//! Base64 codecs used at every serialization boundary.
//!
//! Payload fields use standard base64 with padding. JWK fields use
//! base64url without padding, as RFC 7518 requires.

use crate::error::CryptoResult;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

/// Encodes bytes as standard, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard, padded base64.
pub fn decode_base64(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

/// Encodes bytes as unpadded base64url (JWK member encoding).
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes unpadded base64url.
pub fn decode_base64url(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}
