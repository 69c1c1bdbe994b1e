//! Async entry point for hybrid encryption.
//!
//! [`Polycrypt`] holds the provider and config as immutable state and
//! exposes every protocol operation as an `async fn`. Keys are accepted as
//! exported JWK records and imported per call, so a handle can serve any
//! number of key pairs concurrently.

use crate::config::PolycryptConfig;
use crate::error::{PolycryptError, PolycryptResult};
use polycrypt_crypto::{
    self as crypto, CryptoError, CryptoProvider, CryptoResult, EncryptedPayload, Jwk, KeyPair,
    PrivateKey, PublicKey, SystemProvider,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cheaply clonable handle for hybrid encryption.
#[derive(Clone)]
pub struct Polycrypt {
    provider: Arc<dyn CryptoProvider>,
    config: PolycryptConfig,
}

impl Polycrypt {
    /// Creates a handle backed by [`SystemProvider`].
    pub fn new(config: PolycryptConfig) -> Self {
        Self::with_provider(Arc::new(SystemProvider), config)
    }

    /// Creates a handle backed by a caller-supplied provider.
    pub fn with_provider(provider: Arc<dyn CryptoProvider>, config: PolycryptConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PolycryptConfig {
        &self.config
    }

    /// Generates a new RSA-OAEP key pair in exported form.
    pub async fn generate_key_pair(&self) -> PolycryptResult<KeyPair> {
        let pair = self
            .run("generate_key_pair", crypto::generate_key_pair)
            .await?;
        debug!("generated RSA-OAEP key pair");
        Ok(pair)
    }

    /// Imports an encrypt-only key handle.
    pub async fn restore_public_key(&self, key: &Jwk) -> PolycryptResult<PublicKey> {
        crypto::import_public_key(key).map_err(|e| {
            warn!("public key import failed: {e}");
            e.into()
        })
    }

    /// Imports a decrypt-only key handle.
    pub async fn restore_private_key(&self, key: &Jwk) -> PolycryptResult<PrivateKey> {
        crypto::import_private_key(key).map_err(|e| {
            warn!("private key import failed: {e}");
            e.into()
        })
    }

    /// Encrypts raw bytes for the holder of `public_key`'s private half.
    pub async fn encrypt_bytes(
        &self,
        public_key: &Jwk,
        plaintext: Vec<u8>,
    ) -> PolycryptResult<EncryptedPayload> {
        self.check_plaintext_len(plaintext.len())?;
        let recipient = self.restore_public_key(public_key).await?;
        let len = plaintext.len();

        let payload = self
            .run("encrypt", move |provider| {
                crypto::encrypt(provider, &recipient, &plaintext)
            })
            .await?;
        debug!(plaintext_len = len, "encrypted payload");
        Ok(payload)
    }

    /// Decrypts a payload to raw bytes.
    pub async fn decrypt_bytes(
        &self,
        private_key: &Jwk,
        payload: &EncryptedPayload,
    ) -> PolycryptResult<Vec<u8>> {
        let recipient = self.restore_private_key(private_key).await?;
        let payload = payload.clone();

        let plaintext = self
            .run("decrypt", move |provider| {
                crypto::decrypt(provider, &recipient, &payload)
            })
            .await?;
        debug!(plaintext_len = plaintext.len(), "decrypted payload");
        Ok(plaintext)
    }

    /// Encrypts UTF-8 text.
    pub async fn encrypt_string(
        &self,
        public_key: &Jwk,
        text: &str,
    ) -> PolycryptResult<EncryptedPayload> {
        self.encrypt_bytes(public_key, text.as_bytes().to_vec()).await
    }

    /// Decrypts a payload that must contain UTF-8 text.
    pub async fn decrypt_string(
        &self,
        private_key: &Jwk,
        payload: &EncryptedPayload,
    ) -> PolycryptResult<String> {
        let bytes = self.decrypt_bytes(private_key, payload).await?;
        String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8.into())
    }

    /// Encrypts any serializable value as JSON.
    pub async fn encrypt_json<T: Serialize + ?Sized>(
        &self,
        public_key: &Jwk,
        value: &T,
    ) -> PolycryptResult<EncryptedPayload> {
        let text = serde_json::to_string(value).map_err(CryptoError::from)?;
        self.encrypt_string(public_key, &text).await
    }

    /// Decrypts a JSON payload into `T`.
    pub async fn decrypt_json<T>(
        &self,
        private_key: &Jwk,
        payload: &EncryptedPayload,
    ) -> PolycryptResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let recipient = self.restore_private_key(private_key).await?;
        let payload = payload.clone();

        self.run("decrypt_json", move |provider| {
            crypto::decrypt_structured(provider, &recipient, &payload)
        })
        .await
    }

    fn check_plaintext_len(&self, len: usize) -> PolycryptResult<()> {
        let limit = self.config.max_plaintext_len;
        if len > limit {
            warn!("rejecting {len}-byte plaintext (limit {limit})");
            return Err(PolycryptError::PayloadTooLarge { len, limit });
        }
        Ok(())
    }

    /// Runs a CPU-bound operation, on the blocking pool if configured.
    async fn run<T, F>(&self, op: &'static str, f: F) -> PolycryptResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CryptoProvider) -> CryptoResult<T> + Send + 'static,
    {
        let result = if self.config.offload_blocking {
            let provider = Arc::clone(&self.provider);
            match tokio::task::spawn_blocking(move || f(provider.as_ref())).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("{op}: blocking task failed: {e}");
                    return Err(PolycryptError::TaskFailed(e.to_string()));
                }
            }
        } else {
            f(self.provider.as_ref())
        };

        result.map_err(|e| {
            warn!("{op} failed: {e}");
            e.into()
        })
    }
}

impl std::fmt::Debug for Polycrypt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polycrypt")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Polycrypt {
    fn default() -> Self {
        Self::new(PolycryptConfig::default())
    }
}
