//! Hash and HMAC primitives
//!
//! This module wraps the `sha2` and `hmac` crates behind a single
//! [`HashAlgorithm`] identifier so the derivation engine can dispatch on a
//! runtime value. Both helpers accept their input as a sequence of parts and
//! feed them incrementally, so callers never concatenate secret material
//! into an intermediate buffer.

use crate::error::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::str::FromStr;

macro_rules! hmac_parts {
    ($digest:ty, $key:expr, $parts:expr) => {{
        let mut mac = Hmac::<$digest>::new_from_slice($key)
            .map_err(|e| Error::Cryptography(format!("Failed to initialize HMAC: {}", e)))?;
        for part in $parts {
            mac.update(part);
        }
        Ok(mac.finalize().into_bytes().to_vec())
    }};
}

/// Identifier for a supported hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256 (the default)
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Returns the algorithm name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Computes the digest of the concatenation of `parts`
    pub fn digest(&self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => digest_parts::<Sha256>(parts),
            HashAlgorithm::Sha384 => digest_parts::<Sha384>(parts),
            HashAlgorithm::Sha512 => digest_parts::<Sha512>(parts),
        }
    }

    /// Computes HMAC over the concatenation of `parts`, keyed with `key`
    ///
    /// Standard RFC 2104 key handling applies: keys shorter than the hash
    /// block size are zero-padded, longer keys are hashed first.
    pub fn hmac(&self, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
        match self {
            HashAlgorithm::Sha256 => hmac_parts!(Sha256, key, parts),
            HashAlgorithm::Sha384 => hmac_parts!(Sha384, key, parts),
            HashAlgorithm::Sha512 => hmac_parts!(Sha512, key, parts),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA-256" | "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA-384" | "SHA384" => Ok(HashAlgorithm::Sha384),
            "SHA-512" | "SHA512" => Ok(HashAlgorithm::Sha512),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}
