//! Key agreement abstraction
//!
//! This module provides the trait-based seam between the derivation layer
//! and whatever computes the ECDH shared secret. [`AgreementKey`] is
//! implemented by the in-process software backend
//! ([`LocalKey`](crate::LocalKey)) and can equally be implemented by an
//! HSM- or platform-keystore-backed key, allowing
//! [`KeyAgreementSession`](crate::KeyAgreementSession) to work with either.

use crate::curve::Curve;
use crate::error::{Error, Result};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;
use zeroize::Zeroizing;

/// Raw ECDH agreement output
///
/// Holds the affine x-coordinate of the shared point, encoded as a
/// fixed-width big-endian byte string (the curve's field size). The buffer
/// is zeroed when the value is dropped, on every exit path. The secret is
/// never used directly as a key; it exists only to be consumed by a
/// derivation call.
pub struct SharedSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl SharedSecret {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// The secret bytes, fixed-width per curve
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes (the curve's field size)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the secret is empty (never the case for a valid agreement)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([{} bytes])", self.bytes.len())
    }
}

/// A peer public key on one of the supported curves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// P-256 public key
    P256(p256::PublicKey),
    /// P-384 public key
    P384(p384::PublicKey),
    /// P-521 public key
    P521(p521::PublicKey),
}

impl PublicKey {
    /// The curve this key belongs to
    pub fn curve(&self) -> Curve {
        match self {
            PublicKey::P256(_) => Curve::P256,
            PublicKey::P384(_) => Curve::P384,
            PublicKey::P521(_) => Curve::P521,
        }
    }

    /// Parses a SEC1-encoded point (compressed or uncompressed) on the
    /// given curve
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        match curve {
            Curve::P256 => p256::PublicKey::from_sec1_bytes(bytes)
                .map(PublicKey::P256)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-256 public key: {}", e))),
            Curve::P384 => p384::PublicKey::from_sec1_bytes(bytes)
                .map(PublicKey::P384)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-384 public key: {}", e))),
            Curve::P521 => p521::PublicKey::from_sec1_bytes(bytes)
                .map(PublicKey::P521)
                .map_err(|e| Error::InvalidKey(format!("Invalid P-521 public key: {}", e))),
        }
    }

    /// Exports the key as an uncompressed SEC1 point
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::P256(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            PublicKey::P384(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
            PublicKey::P521(pk) => pk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }
}

/// Defines the core capability of a key that can perform ECDH agreement
///
/// Implementations own a private scalar (in memory, or behind a hardware
/// key-store handle) and produce the shared secret for a peer public key on
/// the same curve.
pub trait AgreementKey: Send + Sync + fmt::Debug {
    /// The curve this key belongs to
    fn curve(&self) -> Curve;

    /// Exports the public half of this key
    fn public_key(&self) -> Result<PublicKey>;

    /// Computes the ECDH shared secret with a peer public key
    ///
    /// Fails with [`Error::CurveMismatch`] when the peer key is on a
    /// different curve.
    fn agree(&self, peer: &PublicKey) -> Result<SharedSecret>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret_debug_is_redacted() {
        let secret = SharedSecret::new(vec![0xAB; 32]);
        let rendered = format!("{:?}", secret);
        assert_eq!(rendered, "SharedSecret([32 bytes])");
        assert!(!rendered.contains("171"));
    }
}
