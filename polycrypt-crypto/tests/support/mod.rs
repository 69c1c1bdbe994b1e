//! Shared fixtures for integration tests.
//!
//! 4096-bit key generation is slow, so each test binary generates two
//! key pairs once and reuses them.

#![allow(dead_code)]

use polycrypt_crypto::{
    KeyPair, PrivateKey, PublicKey, SystemProvider, generate_key_pair, import_private_key,
    import_public_key,
};
use std::sync::LazyLock;

static ALICE: LazyLock<KeyPair> =
    LazyLock::new(|| generate_key_pair(&SystemProvider).expect("generate alice key pair"));
static BOB: LazyLock<KeyPair> =
    LazyLock::new(|| generate_key_pair(&SystemProvider).expect("generate bob key pair"));

pub fn alice() -> &'static KeyPair {
    &ALICE
}

pub fn bob() -> &'static KeyPair {
    &BOB
}

pub fn public_of(pair: &KeyPair) -> PublicKey {
    import_public_key(&pair.public_key).expect("import public key")
}

pub fn private_of(pair: &KeyPair) -> PrivateKey {
    import_private_key(&pair.private_key).expect("import private key")
}
