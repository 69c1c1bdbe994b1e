//! Cryptographic primitive provider.
//!
//! Every protocol operation receives the provider explicitly. The
//! protocol code never reaches for a global RNG or cipher, so a caller can
//! substitute a hardware-backed or instrumented implementation.

use crate::error::{CryptoError, CryptoResult};
use crate::symmetric::{AES_KEY_SIZE, IV_SIZE};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// Primitive operations the hybrid protocol is built on.
///
/// Implementations must be stateless with respect to individual calls:
/// concurrent use from many threads is expected.
pub trait CryptoProvider: Send + Sync {
    /// Generates an RSA private key with the given modulus size and exponent.
    fn generate_rsa_key(&self, bits: usize, public_exponent: u64) -> CryptoResult<RsaPrivateKey>;

    /// Fills `dest` with cryptographically secure random bytes.
    fn fill_random(&self, dest: &mut [u8]) -> CryptoResult<()>;

    /// AES-256-GCM encryption. The 16-byte tag is appended to the output.
    fn aead_seal(
        &self,
        key: &[u8; AES_KEY_SIZE],
        iv: &[u8; IV_SIZE],
        plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>>;

    /// AES-256-GCM decryption. Must fail with [`CryptoError::Authentication`]
    /// when the tag does not verify.
    fn aead_open(
        &self,
        key: &[u8; AES_KEY_SIZE],
        iv: &[u8; IV_SIZE],
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>>;

    /// RSA-OAEP (SHA-256) encryption.
    fn rsa_oaep_encrypt(&self, key: &RsaPublicKey, message: &[u8]) -> CryptoResult<Vec<u8>>;

    /// RSA-OAEP (SHA-256) decryption. Every failure must surface as
    /// [`CryptoError::Unwrap`] so padding errors are indistinguishable from
    /// wrong-key errors.
    fn rsa_oaep_decrypt(&self, key: &RsaPrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>>;
}

/// Provider backed by the RustCrypto crates and the operating system RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProvider;

impl CryptoProvider for SystemProvider {
    fn generate_rsa_key(&self, bits: usize, public_exponent: u64) -> CryptoResult<RsaPrivateKey> {
        RsaPrivateKey::new_with_exp(&mut OsRng, bits, &BigUint::from(public_exponent))
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))
    }

    fn fill_random(&self, dest: &mut [u8]) -> CryptoResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Random(e.to_string()))
    }

    fn aead_seal(
        &self,
        key: &[u8; AES_KEY_SIZE],
        iv: &[u8; IV_SIZE],
        plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| CryptoError::Encryption(format!("AES-GCM seal failed: {e}")))
    }

    fn aead_open(
        &self,
        key: &[u8; AES_KEY_SIZE],
        iv: &[u8; IV_SIZE],
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| CryptoError::Authentication)
    }

    fn rsa_oaep_encrypt(&self, key: &RsaPublicKey, message: &[u8]) -> CryptoResult<Vec<u8>> {
        key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), message)
            .map_err(|e| CryptoError::Encryption(format!("RSA-OAEP wrap failed: {e}")))
    }

    fn rsa_oaep_decrypt(&self, key: &RsaPrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        key.decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), ciphertext)
            .map_err(|_| CryptoError::Unwrap)
    }
}
