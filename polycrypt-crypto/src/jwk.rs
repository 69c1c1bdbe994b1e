//! Portable key records in JSON Web Key form (RFC 7517).
//!
//! Every supported algorithm gets its own variant. Untyped JSON from a
//! caller is validated into [`Jwk`] before any key handle is built from it.

use crate::error::{CryptoError, CryptoResult};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// JWK `alg` value for RSA-OAEP with SHA-256.
pub const RSA_OAEP_256: &str = "RSA-OAEP-256";
/// JWK `alg` value for AES-256-GCM.
pub const A256GCM: &str = "A256GCM";

/// `key_ops` value granting encryption.
pub const OP_ENCRYPT: &str = "encrypt";
/// `key_ops` value granting decryption.
pub const OP_DECRYPT: &str = "decrypt";

/// A key record tagged by its `kty` member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum Jwk {
    #[serde(rename = "RSA")]
    Rsa(RsaJwk),
    #[serde(rename = "oct")]
    Oct(OctJwk),
}

impl Jwk {
    /// Validates untyped JSON into a key record.
    pub fn from_value(value: serde_json::Value) -> CryptoResult<Self> {
        serde_json::from_value(value).map_err(|e| CryptoError::KeyFormat(e.to_string()))
    }

    /// Parses a key record from JSON text.
    pub fn from_json(text: &str) -> CryptoResult<Self> {
        serde_json::from_str(text).map_err(|e| CryptoError::KeyFormat(e.to_string()))
    }

    /// Serializes the record to JSON text.
    pub fn to_json(&self) -> CryptoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The record's `alg` member.
    pub fn alg(&self) -> &str {
        match self {
            Jwk::Rsa(rsa) => &rsa.alg,
            Jwk::Oct(oct) => &oct.alg,
        }
    }
}

/// RSA key parameters. Private members are present only on private keys.
///
/// Integers are big-endian, base64url without padding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RsaJwk {
    pub alg: String,
    pub n: String,
    pub e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(default)]
    pub key_ops: Vec<String>,
    #[serde(default = "default_ext")]
    pub ext: bool,
}

impl RsaJwk {
    /// Returns true if the record carries private parameters.
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }
}

impl std::fmt::Debug for RsaJwk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaJwk")
            .field("alg", &self.alg)
            .field("n", &self.n)
            .field("e", &self.e)
            .field("private", &self.is_private())
            .field("key_ops", &self.key_ops)
            .finish()
    }
}

/// Symmetric key record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct OctJwk {
    pub alg: String,
    pub k: String,
    #[serde(default)]
    pub key_ops: Vec<String>,
    #[serde(default = "default_ext")]
    pub ext: bool,
}

impl std::fmt::Debug for OctJwk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctJwk")
            .field("alg", &self.alg)
            .field("k", &"<redacted>")
            .field("key_ops", &self.key_ops)
            .finish()
    }
}

fn default_ext() -> bool {
    true
}

/// Rejects a record whose `alg` differs from `expected`.
pub(crate) fn check_alg(alg: &str, expected: &str) -> CryptoResult<()> {
    if alg != expected {
        return Err(CryptoError::KeyFormat(format!(
            "algorithm mismatch: expected {expected}, got {alg}"
        )));
    }
    Ok(())
}

/// Rejects a record whose non-empty `key_ops` does not grant `op`.
pub(crate) fn check_key_op(key_ops: &[String], op: &str) -> CryptoResult<()> {
    if !key_ops.is_empty() && !key_ops.iter().any(|o| o == op) {
        return Err(CryptoError::KeyFormat(format!(
            "key_ops {key_ops:?} does not permit {op}"
        )));
    }
    Ok(())
}
