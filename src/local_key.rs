//! Software key agreement backend
//!
//! [`LocalKey`] holds the private scalar in process memory and performs the
//! scalar multiplication through the RustCrypto curve crates. Hardware or
//! platform-keystore backends implement the same
//! [`AgreementKey`](crate::AgreementKey) trait and are interchangeable from
//! the session's point of view.

use crate::agreement::{AgreementKey, PublicKey, SharedSecret};
use crate::curve::Curve;
use crate::error::{Error, Result};
use rand::rngs::OsRng;
use std::fmt;

/// An in-process ECDH private key on one of the supported curves
pub enum LocalKey {
    /// P-256 private key
    P256(p256::SecretKey),
    /// P-384 private key
    P384(p384::SecretKey),
    /// P-521 private key
    P521(p521::SecretKey),
}

impl LocalKey {
    /// Generates a fresh random key on the given curve
    pub fn generate(curve: Curve) -> Self {
        match curve {
            Curve::P256 => LocalKey::P256(p256::SecretKey::random(&mut OsRng)),
            Curve::P384 => LocalKey::P384(p384::SecretKey::random(&mut OsRng)),
            Curve::P521 => LocalKey::P521(p521::SecretKey::random(&mut OsRng)),
        }
    }

    /// Imports a private scalar from fixed-width big-endian bytes
    ///
    /// Rejects zero and out-of-range scalars with
    /// [`Error::InvalidKey`](crate::Error::InvalidKey).
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        match curve {
            Curve::P256 => p256::SecretKey::from_slice(bytes)
                .map(LocalKey::P256)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-256 private key: {}", e))),
            Curve::P384 => p384::SecretKey::from_slice(bytes)
                .map(LocalKey::P384)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-384 private key: {}", e))),
            Curve::P521 => p521::SecretKey::from_slice(bytes)
                .map(LocalKey::P521)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-521 private key: {}", e))),
        }
    }
}

impl AgreementKey for LocalKey {
    fn curve(&self) -> Curve {
        match self {
            LocalKey::P256(_) => Curve::P256,
            LocalKey::P384(_) => Curve::P384,
            LocalKey::P521(_) => Curve::P521,
        }
    }

    fn public_key(&self) -> Result<PublicKey> {
        Ok(match self {
            LocalKey::P256(sk) => PublicKey::P256(sk.public_key()),
            LocalKey::P384(sk) => PublicKey::P384(sk.public_key()),
            LocalKey::P521(sk) => PublicKey::P521(sk.public_key()),
        })
    }

    fn agree(&self, peer: &PublicKey) -> Result<SharedSecret> {
        match (self, peer) {
            (LocalKey::P256(sk), PublicKey::P256(pk)) => {
                let shared = p256::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
                Ok(SharedSecret::new(shared.raw_secret_bytes().to_vec()))
            }
            (LocalKey::P384(sk), PublicKey::P384(pk)) => {
                let shared = p384::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
                Ok(SharedSecret::new(shared.raw_secret_bytes().to_vec()))
            }
            (LocalKey::P521(sk), PublicKey::P521(pk)) => {
                let shared = p521::ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
                Ok(SharedSecret::new(shared.raw_secret_bytes().to_vec()))
            }
            _ => Err(Error::CurveMismatch {
                local: self.curve(),
                peer: peer.curve(),
            }),
        }
    }
}

impl fmt::Debug for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose the scalar
        write!(f, "LocalKey({})", self.curve())
    }
}
