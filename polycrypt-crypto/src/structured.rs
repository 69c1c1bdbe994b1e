//! Structured values over the hybrid scheme.
//!
//! Values are encoded to JSON text before encryption and parsed back after
//! decryption. Nothing else is transformed.

use crate::error::CryptoResult;
use crate::hybrid::{self, EncryptedPayload};
use crate::keys::{PrivateKey, PublicKey};
use crate::provider::CryptoProvider;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encrypts any serializable value.
pub fn encrypt_structured<T: Serialize + ?Sized>(
    provider: &dyn CryptoProvider,
    recipient: &PublicKey,
    value: &T,
) -> CryptoResult<EncryptedPayload> {
    let text = serde_json::to_string(value)?;
    hybrid::encrypt_string(provider, recipient, &text)
}

/// Decrypts a payload and parses it as `T`.
///
/// Use `serde_json::Value` for `T` when the shape is not known up front.
pub fn decrypt_structured<T: DeserializeOwned>(
    provider: &dyn CryptoProvider,
    recipient: &PrivateKey,
    payload: &EncryptedPayload,
) -> CryptoResult<T> {
    let text = hybrid::decrypt_string(provider, recipient, payload)?;
    Ok(serde_json::from_str(&text)?)
}
