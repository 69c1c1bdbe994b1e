//! Ephemeral AES-256-GCM encryption.
//!
//! Each call to [`encrypt`] draws a fresh key and a fresh 12-byte nonce
//! from the provider. The pair is returned as a [`SymmetricEnvelope`] and is
//! never used for a second message.

use crate::codec::{decode_base64url, encode_base64url};
use crate::error::{CryptoError, CryptoResult};
use crate::jwk::{self, A256GCM, Jwk, OP_DECRYPT, OP_ENCRYPT, OctJwk};
use crate::provider::CryptoProvider;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key size in bytes.
pub const AES_KEY_SIZE: usize = 32;
/// AES-GCM nonce size in bytes.
pub const IV_SIZE: usize = 12;
/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// A 256-bit AES key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; AES_KEY_SIZE]);

impl SymmetricKey {
    /// Draws a new random key from the provider.
    pub fn generate(provider: &dyn CryptoProvider) -> CryptoResult<Self> {
        let mut bytes = [0u8; AES_KEY_SIZE];
        provider.fill_random(&mut bytes)?;
        let key = Self(bytes);
        bytes.zeroize();
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_SIZE] {
        &self.0
    }

    /// Exports the key as an `A256GCM` record.
    pub fn to_jwk(&self) -> Jwk {
        Jwk::Oct(OctJwk {
            alg: A256GCM.to_string(),
            k: encode_base64url(&self.0),
            key_ops: vec![OP_ENCRYPT.to_string(), OP_DECRYPT.to_string()],
            ext: true,
        })
    }

    /// Imports an `A256GCM` record.
    pub fn from_jwk(record: &Jwk) -> CryptoResult<Self> {
        let Jwk::Oct(record) = record else {
            return Err(CryptoError::KeyFormat(
                "expected a symmetric key record, found an RSA key".to_string(),
            ));
        };
        jwk::check_alg(&record.alg, A256GCM)?;
        jwk::check_key_op(&record.key_ops, OP_DECRYPT)?;

        let mut bytes = decode_base64url(&record.k)
            .map_err(|_| CryptoError::KeyFormat("k is not valid base64url".to_string()))?;
        if bytes.len() != AES_KEY_SIZE {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::KeyFormat(format!(
                "AES-256 key must be {AES_KEY_SIZE} bytes, got {actual}"
            )));
        }

        let mut key = [0u8; AES_KEY_SIZE];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Key and nonce protecting exactly one message.
///
/// Serializes as `{"key": <A256GCM jwk>, "iv": [12 integers]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymmetricEnvelope {
    pub key: Jwk,
    pub iv: [u8; IV_SIZE],
}

impl SymmetricEnvelope {
    /// Serializes the envelope to UTF-8 JSON.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parses and validates an envelope recovered from an unwrap.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let envelope: Self =
            serde_json::from_slice(bytes).map_err(|e| CryptoError::EnvelopeFormat(e.to_string()))?;
        SymmetricKey::from_jwk(&envelope.key).map_err(|e| match e {
            CryptoError::KeyFormat(msg) => CryptoError::EnvelopeFormat(msg),
            other => other,
        })?;
        Ok(envelope)
    }
}

/// Output of [`encrypt`]: AEAD ciphertext plus the envelope that opens it.
#[derive(Clone, Debug)]
pub struct SymmetricCiphertext {
    /// Ciphertext with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,
    pub envelope: SymmetricEnvelope,
}

/// Encrypts `plaintext` under a freshly generated key and nonce.
pub fn encrypt(provider: &dyn CryptoProvider, plaintext: &[u8]) -> CryptoResult<SymmetricCiphertext> {
    let key = SymmetricKey::generate(provider)?;
    let mut iv = [0u8; IV_SIZE];
    provider.fill_random(&mut iv)?;

    let ciphertext = provider.aead_seal(key.as_bytes(), &iv, plaintext)?;

    Ok(SymmetricCiphertext {
        ciphertext,
        envelope: SymmetricEnvelope {
            key: key.to_jwk(),
            iv,
        },
    })
}

/// Decrypts and verifies `ciphertext`.
///
/// Fails with [`CryptoError::Authentication`] if the tag does not verify.
pub fn decrypt(
    provider: &dyn CryptoProvider,
    key: &Jwk,
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let key = SymmetricKey::from_jwk(key)?;
    if ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::Authentication);
    }
    provider.aead_open(key.as_bytes(), iv, ciphertext)
}
