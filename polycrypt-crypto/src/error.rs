//! Error types for the hybrid encryption core.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during key handling, encryption, or decryption.
///
/// `Unwrap` and `Authentication` deliberately carry no detail: callers must
/// not be able to tell a wrong key from a tampered ciphertext.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key material: {0}")]
    KeyFormat(String),

    #[error("failed to unwrap envelope (wrong key or corrupted data)")]
    Unwrap,

    #[error("malformed envelope: {0}")]
    EnvelopeFormat(String),

    #[error("authentication failed (wrong key, wrong nonce, or tampered data)")]
    Authentication,

    #[error("invalid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("random number generation failed: {0}")]
    Random(String),

    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
