//! Hybrid public-key encryption core for Polycrypt.
//!
//! Combines RSA-OAEP and AES-256-GCM:
//! - RSA-OAEP (4096-bit modulus, exponent 65537, SHA-256) wraps a
//!   per-message symmetric key
//! - AES-256-GCM encrypts the payload under that key with a fresh nonce
//! - Keys travel as JSON Web Key records
//!
//! # Architecture
//!
//! Every operation takes a [`CryptoProvider`] explicitly. The provider
//! supplies randomness, key generation, and the raw AEAD and OAEP
//! primitives; this crate owns the protocol around them:
//!
//! 1. [`symmetric`] seals the payload and yields a one-shot envelope.
//! 2. [`hybrid`] wraps the envelope for the recipient and produces the
//!    base64 [`EncryptedPayload`] that goes on the wire.
//! 3. [`structured`] layers JSON encoding on top for typed values.
//!
//! Decryption never returns partial plaintext: it either succeeds end to
//! end or fails with a single [`CryptoError`].

mod codec;
mod error;
pub mod hybrid;
pub mod jwk;
pub mod keys;
pub mod provider;
pub mod structured;
pub mod symmetric;

pub use codec::{decode_base64, decode_base64url, encode_base64, encode_base64url};
pub use error::{CryptoError, CryptoResult};
pub use hybrid::{
    EncryptedPayload, OAEP_MAX_MESSAGE_LEN, decrypt, decrypt_string, encrypt, encrypt_string,
};
pub use jwk::{Jwk, OctJwk, RsaJwk};
pub use keys::{
    KeyPair, PrivateKey, PublicKey, RSA_MODULUS_BITS, RSA_PUBLIC_EXPONENT, generate_key_pair,
    import_private_key, import_public_key,
};
pub use provider::{CryptoProvider, SystemProvider};
pub use structured::{decrypt_structured, encrypt_structured};
pub use symmetric::{AES_KEY_SIZE, IV_SIZE, SymmetricEnvelope, SymmetricKey, TAG_SIZE};
