//! RSA-OAEP key pair lifecycle.
//!
//! Key pairs are generated through the provider and handed out in exported
//! JWK form. Importing a record yields a handle restricted to one
//! capability: [`PublicKey`] can only wrap, [`PrivateKey`] can only unwrap.

use crate::codec::{decode_base64url, encode_base64url};
use crate::error::{CryptoError, CryptoResult};
use crate::jwk::{self, Jwk, OP_DECRYPT, OP_ENCRYPT, RSA_OAEP_256, RsaJwk};
use crate::provider::CryptoProvider;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

/// RSA modulus size in bits.
pub const RSA_MODULUS_BITS: usize = 4096;
/// RSA public exponent (F4).
pub const RSA_PUBLIC_EXPONENT: u64 = 65537;

/// Exported key pair, as returned by [`generate_key_pair`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: Jwk,
    pub private_key: Jwk,
}

/// Encrypt-only RSA-OAEP key handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    pub fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Exports the key as a JWK restricted to `encrypt`.
    pub fn to_jwk(&self) -> Jwk {
        Jwk::Rsa(RsaJwk {
            alg: RSA_OAEP_256.to_string(),
            n: encode_uint(self.0.n()),
            e: encode_uint(self.0.e()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            key_ops: vec![OP_ENCRYPT.to_string()],
            ext: true,
        })
    }
}

/// Decrypt-only RSA-OAEP key handle.
///
/// The inner key zeroizes itself on drop.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }

    /// Returns the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.to_public_key())
    }

    /// Exports the key as a JWK restricted to `decrypt`, including CRT
    /// parameters.
    pub fn to_jwk(&self) -> CryptoResult<Jwk> {
        let key = &self.0;
        let [p, q] = key.primes() else {
            return Err(CryptoError::KeyFormat(format!(
                "expected two primes, found {}",
                key.primes().len()
            )));
        };
        let missing_crt = || CryptoError::KeyFormat("CRT parameters not precomputed".to_string());
        let dp = key.dp().ok_or_else(missing_crt)?;
        let dq = key.dq().ok_or_else(missing_crt)?;
        let qi = key.crt_coefficient().ok_or_else(missing_crt)?;

        Ok(Jwk::Rsa(RsaJwk {
            alg: RSA_OAEP_256.to_string(),
            n: encode_uint(key.n()),
            e: encode_uint(key.e()),
            d: Some(encode_uint(key.d())),
            p: Some(encode_uint(p)),
            q: Some(encode_uint(q)),
            dp: Some(encode_uint(dp)),
            dq: Some(encode_uint(dq)),
            qi: Some(encode_uint(&qi)),
            key_ops: vec![OP_DECRYPT.to_string()],
            ext: true,
        }))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.0.n().bits())
            .finish_non_exhaustive()
    }
}

/// Generates a new RSA-OAEP key pair (4096-bit modulus, exponent 65537,
/// SHA-256) and returns both halves in exported form.
pub fn generate_key_pair(provider: &dyn CryptoProvider) -> CryptoResult<KeyPair> {
    let private = PrivateKey(provider.generate_rsa_key(RSA_MODULUS_BITS, RSA_PUBLIC_EXPONENT)?);
    let public = private.public_key();

    Ok(KeyPair {
        public_key: public.to_jwk(),
        private_key: private.to_jwk()?,
    })
}

/// Reconstructs an encrypt-only key handle from an exported record.
pub fn import_public_key(material: &Jwk) -> CryptoResult<PublicKey> {
    let record = rsa_record(material)?;
    jwk::check_key_op(&record.key_ops, OP_ENCRYPT)?;
    Ok(PublicKey(public_from_record(record)?))
}

/// Reconstructs a decrypt-only key handle from an exported record.
pub fn import_private_key(material: &Jwk) -> CryptoResult<PrivateKey> {
    let record = rsa_record(material)?;
    jwk::check_key_op(&record.key_ops, OP_DECRYPT)?;
    let public = public_from_record(record)?;

    let d = decode_uint("d", required("d", &record.d)?)?;
    let p = decode_uint("p", required("p", &record.p)?)?;
    let q = decode_uint("q", required("q", &record.q)?)?;

    let key = RsaPrivateKey::from_components(public.n().clone(), public.e().clone(), d, vec![p, q])
        .map_err(|e| CryptoError::KeyFormat(format!("inconsistent private key: {e}")))?;
    key.validate()
        .map_err(|e| CryptoError::KeyFormat(format!("inconsistent private key: {e}")))?;

    check_crt("dp", &record.dp, key.dp())?;
    check_crt("dq", &record.dq, key.dq())?;
    check_crt("qi", &record.qi, key.crt_coefficient().as_ref())?;

    Ok(PrivateKey(key))
}

fn rsa_record(material: &Jwk) -> CryptoResult<&RsaJwk> {
    match material {
        Jwk::Rsa(record) => {
            jwk::check_alg(&record.alg, RSA_OAEP_256)?;
            Ok(record)
        }
        Jwk::Oct(_) => Err(CryptoError::KeyFormat(
            "expected an RSA key record, found a symmetric key".to_string(),
        )),
    }
}

fn public_from_record(record: &RsaJwk) -> CryptoResult<RsaPublicKey> {
    let n = decode_uint("n", &record.n)?;
    let e = decode_uint("e", &record.e)?;

    if n.bits() != RSA_MODULUS_BITS {
        return Err(CryptoError::KeyFormat(format!(
            "modulus must be {RSA_MODULUS_BITS} bits, got {}",
            n.bits()
        )));
    }
    if e != BigUint::from(RSA_PUBLIC_EXPONENT) {
        return Err(CryptoError::KeyFormat(format!(
            "public exponent must be {RSA_PUBLIC_EXPONENT}"
        )));
    }

    RsaPublicKey::new(n, e).map_err(|e| CryptoError::KeyFormat(e.to_string()))
}

fn required<'a>(name: &str, member: &'a Option<String>) -> CryptoResult<&'a str> {
    member
        .as_deref()
        .ok_or_else(|| CryptoError::KeyFormat(format!("missing private member {name}")))
}

fn check_crt(name: &str, member: &Option<String>, expected: Option<&BigUint>) -> CryptoResult<()> {
    if let (Some(text), Some(expected)) = (member, expected) {
        if decode_uint(name, text)? != *expected {
            return Err(CryptoError::KeyFormat(format!(
                "{name} does not match the private key"
            )));
        }
    }
    Ok(())
}

fn encode_uint(value: &BigUint) -> String {
    encode_base64url(&value.to_bytes_be())
}

fn decode_uint(name: &str, text: &str) -> CryptoResult<BigUint> {
    let bytes = decode_base64url(text)
        .map_err(|_| CryptoError::KeyFormat(format!("{name} is not valid base64url")))?;
    if bytes.is_empty() {
        return Err(CryptoError::KeyFormat(format!("{name} is empty")));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}
