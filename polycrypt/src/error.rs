//! Polycrypt error types.

use polycrypt_crypto::CryptoError;
use thiserror::Error;

/// Result type for Polycrypt operations.
pub type PolycryptResult<T> = Result<T, PolycryptError>;

/// Errors surfaced by the async facade.
#[derive(Debug, Error)]
pub enum PolycryptError {
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("payload too large: {len} bytes exceeds limit of {limit}")]
    PayloadTooLarge { len: usize, limit: usize },

    #[error("blocking task failed: {0}")]
    TaskFailed(String),
}

impl PolycryptError {
    /// Returns the underlying crypto error, if any.
    pub fn as_crypto(&self) -> Option<&CryptoError> {
        match self {
            PolycryptError::Crypto(e) => Some(e),
            _ => None,
        }
    }
}
