//! End-to-end tests for hybrid RSA-OAEP + AES-256-GCM encryption.
//!
//! Validates that:
//! - Text of any shape round-trips exactly
//! - Decrypting with another key pair is rejected
//! - Every encryption draws a fresh envelope
//! - Tampering with either half of the payload fails the whole operation
//! - Provider failures propagate unchanged

mod support;

use polycrypt_crypto::{
    CryptoError, CryptoProvider, CryptoResult, EncryptedPayload, IV_SIZE, OAEP_MAX_MESSAGE_LEN,
    SystemProvider, decode_base64, decrypt, decrypt_string, encode_base64, encrypt,
    encrypt_string,
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use support::{alice, bob, private_of, public_of};

fn roundtrip(text: &str) -> String {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), text).unwrap();
    decrypt_string(&SystemProvider, &private_of(alice()), &payload).unwrap()
}

// ── Round trips ──

#[test]
fn hello_world_roundtrip() {
    assert_eq!(roundtrip("Hello, world!"), "Hello, world!");
}

#[test]
fn second_key_pair_roundtrips_independently() {
    let payload = encrypt_string(&SystemProvider, &public_of(bob()), "Hello, world222").unwrap();
    let text = decrypt_string(&SystemProvider, &private_of(bob()), &payload).unwrap();
    assert_eq!(text, "Hello, world222");
}

#[test]
fn empty_string_roundtrip() {
    assert_eq!(roundtrip(""), "");
}

#[test]
fn long_repeated_string_roundtrip() {
    let text = "A".repeat(1000);
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn unicode_roundtrip() {
    let text = "héllo wörld, 你好, こんにちは, 🔐🗝️";
    assert_eq!(roundtrip(text), text);
}

#[test]
fn quotes_and_symbols_roundtrip() {
    let text = r#"Hello, "world"! How's it going? !@#$%^&*()_+-={}[]|\:;"'<>,.?/~`"#;
    assert_eq!(roundtrip(text), text);
}

#[test]
fn binary_payload_roundtrip() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
    let payload = encrypt(&SystemProvider, &public_of(alice()), &bytes).unwrap();
    let opened = decrypt(&SystemProvider, &private_of(alice()), &payload).unwrap();
    assert_eq!(opened, bytes);
}

// ── Wire format ──

#[test]
fn payload_has_only_data_and_key_fields() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "shape").unwrap();
    let value = serde_json::to_value(&payload).unwrap();
    let mut fields: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, ["data", "key"]);

    let wrapped = decode_base64(&payload.key).unwrap();
    assert_eq!(wrapped.len(), 512, "wrapped key must be one RSA-4096 block");

    let data = decode_base64(&payload.data).unwrap();
    assert_eq!(data.len(), "shape".len() + 16);
}

#[test]
fn payload_deserializes_from_wire_json() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "wire").unwrap();
    let text = serde_json::to_string(&payload).unwrap();
    let back: EncryptedPayload = serde_json::from_str(&text).unwrap();
    assert_eq!(
        decrypt_string(&SystemProvider, &private_of(alice()), &back).unwrap(),
        "wire"
    );
}

#[test]
fn oaep_capacity_matches_rsa_4096_sha256() {
    assert_eq!(OAEP_MAX_MESSAGE_LEN, 446);
}

// ── Freshness ──

#[test]
fn same_plaintext_encrypts_differently_each_time() {
    let public = public_of(alice());
    let a = encrypt_string(&SystemProvider, &public, "same message").unwrap();
    let b = encrypt_string(&SystemProvider, &public, "same message").unwrap();

    assert_ne!(a.data, b.data);
    assert_ne!(a.key, b.key);
}

// ── Rejection ──

#[test]
fn other_key_pair_cannot_decrypt() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "Hello, world!").unwrap();
    let err = decrypt_string(&SystemProvider, &private_of(bob()), &payload).unwrap_err();
    assert!(
        matches!(err, CryptoError::Unwrap),
        "expected CryptoError::Unwrap, got: {err:?}"
    );
}

#[test]
fn tampered_wrapped_key_is_indistinguishable_from_wrong_key() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "secret").unwrap();

    let mut wrapped = decode_base64(&payload.key).unwrap();
    wrapped[100] ^= 0x01;
    let tampered = EncryptedPayload {
        data: payload.data.clone(),
        key: encode_base64(&wrapped),
    };

    let tampered_err = decrypt(&SystemProvider, &private_of(alice()), &tampered).unwrap_err();
    let wrong_key_err = decrypt(&SystemProvider, &private_of(bob()), &payload).unwrap_err();
    assert!(matches!(tampered_err, CryptoError::Unwrap));
    assert_eq!(tampered_err.to_string(), wrong_key_err.to_string());
}

#[test]
fn tampered_data_fails_authentication() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "integrity").unwrap();

    let mut data = decode_base64(&payload.data).unwrap();
    data[0] ^= 0xFF;
    let tampered = EncryptedPayload {
        data: encode_base64(&data),
        key: payload.key.clone(),
    };

    let err = decrypt(&SystemProvider, &private_of(alice()), &tampered).unwrap_err();
    assert!(matches!(err, CryptoError::Authentication));
}

#[test]
fn swapped_envelope_fails_authentication() {
    let public = public_of(alice());
    let first = encrypt_string(&SystemProvider, &public, "first").unwrap();
    let second = encrypt_string(&SystemProvider, &public, "second").unwrap();

    let mixed = EncryptedPayload {
        data: first.data,
        key: second.key,
    };
    let err = decrypt(&SystemProvider, &private_of(alice()), &mixed).unwrap_err();
    assert!(matches!(err, CryptoError::Authentication));
}

#[test]
fn malformed_base64_is_encoding_error() {
    let payload = encrypt_string(&SystemProvider, &public_of(alice()), "encoding").unwrap();

    let bad_key = EncryptedPayload {
        data: payload.data.clone(),
        key: "%%% not base64 %%%".into(),
    };
    let err = decrypt(&SystemProvider, &private_of(alice()), &bad_key).unwrap_err();
    assert!(matches!(err, CryptoError::Encoding(_)));

    let bad_data = EncryptedPayload {
        data: "%%% not base64 %%%".into(),
        key: payload.key,
    };
    let err = decrypt(&SystemProvider, &private_of(alice()), &bad_data).unwrap_err();
    assert!(matches!(err, CryptoError::Encoding(_)));
}

#[test]
fn unparseable_envelope_is_envelope_format_error() {
    let public = public_of(alice());
    let wrapped = SystemProvider
        .rsa_oaep_encrypt(public.as_rsa(), br#"{"key": "nope"}"#)
        .unwrap();
    let payload = EncryptedPayload {
        data: encode_base64(&[0u8; 32]),
        key: encode_base64(&wrapped),
    };

    let err = decrypt(&SystemProvider, &private_of(alice()), &payload).unwrap_err();
    assert!(
        matches!(err, CryptoError::EnvelopeFormat(_)),
        "expected EnvelopeFormat, got: {err:?}"
    );
}

#[test]
fn non_utf8_plaintext_rejected_by_decrypt_string() {
    let payload = encrypt(&SystemProvider, &public_of(alice()), &[0xFF, 0xFE, 0x00]).unwrap();
    let err = decrypt_string(&SystemProvider, &private_of(alice()), &payload).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidUtf8));

    // The raw byte API still returns the exact bytes.
    let bytes = decrypt(&SystemProvider, &private_of(alice()), &payload).unwrap();
    assert_eq!(bytes, [0xFF, 0xFE, 0x00]);
}

// ── Injected provider ──

/// Delegates to the system provider, counting random draws and optionally
/// failing them.
#[derive(Default)]
struct InstrumentedProvider {
    random_draws: AtomicUsize,
    fail_random: bool,
}

impl CryptoProvider for InstrumentedProvider {
    fn generate_rsa_key(&self, bits: usize, public_exponent: u64) -> CryptoResult<RsaPrivateKey> {
        SystemProvider.generate_rsa_key(bits, public_exponent)
    }

    fn fill_random(&self, dest: &mut [u8]) -> CryptoResult<()> {
        self.random_draws.fetch_add(1, Ordering::SeqCst);
        if self.fail_random {
            return Err(CryptoError::Random("entropy source unavailable".into()));
        }
        SystemProvider.fill_random(dest)
    }

    fn aead_seal(&self, key: &[u8; 32], iv: &[u8; IV_SIZE], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        SystemProvider.aead_seal(key, iv, plaintext)
    }

    fn aead_open(&self, key: &[u8; 32], iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        SystemProvider.aead_open(key, iv, ciphertext)
    }

    fn rsa_oaep_encrypt(&self, key: &RsaPublicKey, message: &[u8]) -> CryptoResult<Vec<u8>> {
        SystemProvider.rsa_oaep_encrypt(key, message)
    }

    fn rsa_oaep_decrypt(&self, key: &RsaPrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        SystemProvider.rsa_oaep_decrypt(key, ciphertext)
    }
}

#[test]
fn each_encryption_draws_key_and_nonce_from_provider() {
    let provider = InstrumentedProvider::default();
    let public = public_of(alice());

    let payload = encrypt_string(&provider, &public, "counted").unwrap();
    assert_eq!(provider.random_draws.load(Ordering::SeqCst), 2);

    encrypt_string(&provider, &public, "counted").unwrap();
    assert_eq!(provider.random_draws.load(Ordering::SeqCst), 4);

    let text = decrypt_string(&provider, &private_of(alice()), &payload).unwrap();
    assert_eq!(text, "counted");
    assert_eq!(
        provider.random_draws.load(Ordering::SeqCst),
        4,
        "decryption must not draw randomness through the provider"
    );
}

#[test]
fn provider_failure_propagates_without_output() {
    let provider = InstrumentedProvider {
        fail_random: true,
        ..Default::default()
    };

    let err = encrypt_string(&provider, &public_of(alice()), "never sent").unwrap_err();
    match err {
        CryptoError::Random(msg) => assert!(msg.contains("entropy")),
        other => panic!("expected CryptoError::Random, got: {other:?}"),
    }
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn any_string_roundtrips(text in ".{0,512}") {
            prop_assert_eq!(roundtrip(&text), text);
        }
    }
}
