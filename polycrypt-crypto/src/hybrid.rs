//! Hybrid encryption: AES-256-GCM for the payload, RSA-OAEP for the key.
//!
//! Encryption:
//! 1. Encrypt the plaintext under a fresh symmetric key and nonce.
//! 2. Serialize `{key, iv}` as UTF-8 JSON.
//! 3. Wrap that buffer with the recipient's public key (OAEP, SHA-256).
//! 4. Base64-encode both ciphertexts into an [`EncryptedPayload`].
//!
//! Decryption reverses the steps and either returns the exact original
//! bytes or fails as a whole.

use crate::codec::{decode_base64, encode_base64};
use crate::error::{CryptoError, CryptoResult};
use crate::keys::{PrivateKey, PublicKey, RSA_MODULUS_BITS};
use crate::provider::CryptoProvider;
use crate::symmetric::{self, SymmetricEnvelope};
use serde::{Deserialize, Serialize};

/// SHA-256 digest size, used in the OAEP capacity bound.
const OAEP_HASH_SIZE: usize = 32;

/// Largest message RSA-OAEP (SHA-256) can wrap under a 4096-bit modulus.
pub const OAEP_MAX_MESSAGE_LEN: usize = RSA_MODULUS_BITS / 8 - 2 * OAEP_HASH_SIZE - 2;

/// The transmitted artifact: `{"data": <base64>, "key": <base64>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// AEAD ciphertext with embedded tag.
    pub data: String,
    /// OAEP-wrapped symmetric envelope.
    pub key: String,
}

/// Encrypts `plaintext` for the holder of `recipient`'s private key.
pub fn encrypt(
    provider: &dyn CryptoProvider,
    recipient: &PublicKey,
    plaintext: &[u8],
) -> CryptoResult<EncryptedPayload> {
    let sealed = symmetric::encrypt(provider, plaintext)?;
    let envelope = sealed.envelope.to_bytes()?;

    if envelope.len() > OAEP_MAX_MESSAGE_LEN {
        return Err(CryptoError::Encryption(format!(
            "envelope is {} bytes, OAEP capacity is {OAEP_MAX_MESSAGE_LEN}",
            envelope.len()
        )));
    }

    let wrapped = provider.rsa_oaep_encrypt(recipient.as_rsa(), &envelope)?;

    Ok(EncryptedPayload {
        data: encode_base64(&sealed.ciphertext),
        key: encode_base64(&wrapped),
    })
}

/// Decrypts a payload produced by [`encrypt`].
pub fn decrypt(
    provider: &dyn CryptoProvider,
    recipient: &PrivateKey,
    payload: &EncryptedPayload,
) -> CryptoResult<Vec<u8>> {
    let wrapped = decode_base64(&payload.key)?;
    let envelope = provider.rsa_oaep_decrypt(recipient.as_rsa(), &wrapped)?;
    let envelope = SymmetricEnvelope::from_bytes(&envelope)?;

    let ciphertext = decode_base64(&payload.data)?;
    symmetric::decrypt(provider, &envelope.key, &envelope.iv, &ciphertext)
}

/// Encrypts UTF-8 text.
pub fn encrypt_string(
    provider: &dyn CryptoProvider,
    recipient: &PublicKey,
    text: &str,
) -> CryptoResult<EncryptedPayload> {
    encrypt(provider, recipient, text.as_bytes())
}

/// Decrypts a payload that must contain UTF-8 text.
pub fn decrypt_string(
    provider: &dyn CryptoProvider,
    recipient: &PrivateKey,
    payload: &EncryptedPayload,
) -> CryptoResult<String> {
    let bytes = decrypt(provider, recipient, payload)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
}
