//! Polycrypt configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::Polycrypt`] handle.
///
/// Algorithm parameters are protocol constants and are not configurable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolycryptConfig {
    /// Run key generation, encryption, and decryption on the tokio blocking
    /// pool instead of the calling task.
    pub offload_blocking: bool,

    /// Largest plaintext accepted for encryption, in bytes.
    pub max_plaintext_len: usize,
}

impl Default for PolycryptConfig {
    fn default() -> Self {
        Self {
            offload_blocking: true,
            max_plaintext_len: 64 * 1024 * 1024, // 64 MiB
        }
    }
}

impl PolycryptConfig {
    /// Creates a config that runs everything inline with a small limit.
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            offload_blocking: false,
            max_plaintext_len: 1024,
        }
    }
}
