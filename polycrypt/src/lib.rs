//! Async hybrid public-key encryption.
//!
//! Wraps the `polycrypt-crypto` core with:
//! - An async [`Polycrypt`] handle that offloads RSA and AES work to the
//!   tokio blocking pool
//! - Plaintext size limits from [`PolycryptConfig`]
//! - `tracing` diagnostics for every operation (never key material)
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> polycrypt::PolycryptResult<()> {
//! use polycrypt::{Polycrypt, PolycryptConfig};
//!
//! let polycrypt = Polycrypt::new(PolycryptConfig::default());
//! let pair = polycrypt.generate_key_pair().await?;
//!
//! let payload = polycrypt.encrypt_string(&pair.public_key, "Hello, world!").await?;
//! let text = polycrypt.decrypt_string(&pair.private_key, &payload).await?;
//! assert_eq!(text, "Hello, world!");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::Polycrypt;
pub use config::PolycryptConfig;
pub use error::{PolycryptError, PolycryptResult};
pub use polycrypt_crypto::{
    CryptoError, CryptoProvider, EncryptedPayload, Jwk, KeyPair, SystemProvider,
};
