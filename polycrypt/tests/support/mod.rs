//! Shared helpers for facade integration tests.

#![allow(dead_code)]

use polycrypt_crypto::{KeyPair, SystemProvider, generate_key_pair};
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

/// Installs a test-friendly subscriber once; `RUST_LOG` overrides the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
