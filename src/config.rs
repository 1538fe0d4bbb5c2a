//! Derivation configuration
//!
//! This module defines [`DerivationConfig`], the immutable value object that
//! fully determines how a shared secret is turned into key material. Two
//! equal configs applied to the same shared secret always yield identical
//! output, regardless of whether they were built per call or accumulated as
//! session state.

use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use std::fmt;
use zeroize::Zeroize;

/// Selects which key-derivation algorithm consumes the shared secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivationMode {
    /// `Hash(prepend || secret || append)` (the default)
    #[default]
    Hash,
    /// `HMAC_key(prepend || secret || append)`, keyed with `hmac_key` or,
    /// when unset, with the secret itself
    Hmac,
    /// TLS 1.2 style PRF expansion of the secret with a label and seed
    TlsPrf,
}

/// Parameter bundle for a single key derivation
///
/// Which fields are meaningful depends on the mode:
///
/// | Mode     | Used fields                          |
/// |----------|--------------------------------------|
/// | `Hash`   | `prepend`, `append`                  |
/// | `Hmac`   | `hmac_key`, `prepend`, `append`      |
/// | `TlsPrf` | `label`, `seed`, `output_length`     |
///
/// Fields outside the active mode are ignored, not rejected, so a stateful
/// caller can switch modes without clearing leftovers.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DerivationConfig {
    mode: DerivationMode,
    hash: HashAlgorithm,
    prepend: Option<Vec<u8>>,
    append: Option<Vec<u8>>,
    hmac_key: Option<Vec<u8>>,
    label: Option<Vec<u8>>,
    seed: Option<Vec<u8>>,
    output_length: Option<usize>,
}

impl DerivationConfig {
    /// Creates a config for Hash mode with the given hash algorithm
    pub fn hash(hash: HashAlgorithm) -> Self {
        let mut config = Self::default();
        config.mode = DerivationMode::Hash;
        config.hash = hash;
        config
    }

    /// Creates a config for HMAC mode with the given hash algorithm
    pub fn hmac(hash: HashAlgorithm) -> Self {
        let mut config = Self::default();
        config.mode = DerivationMode::Hmac;
        config.hash = hash;
        config
    }

    /// Creates a config for TLS PRF mode
    pub fn tls_prf(
        hash: HashAlgorithm,
        label: impl Into<Vec<u8>>,
        seed: impl Into<Vec<u8>>,
        output_length: usize,
    ) -> Self {
        let mut config = Self::default();
        config.mode = DerivationMode::TlsPrf;
        config.hash = hash;
        config.label = Some(label.into());
        config.seed = Some(seed.into());
        config.output_length = Some(output_length);
        config
    }

    /// Sets the bytes hashed before the secret (Hash and HMAC modes)
    pub fn with_prepend(mut self, prepend: impl Into<Vec<u8>>) -> Self {
        self.prepend = Some(prepend.into());
        self
    }

    /// Sets the bytes hashed after the secret (Hash and HMAC modes)
    pub fn with_append(mut self, append: impl Into<Vec<u8>>) -> Self {
        self.append = Some(append.into());
        self
    }

    /// Sets an explicit HMAC key (HMAC mode); when unset the shared secret
    /// itself keys the HMAC
    pub fn with_hmac_key(mut self, hmac_key: impl Into<Vec<u8>>) -> Self {
        self.hmac_key = Some(hmac_key.into());
        self
    }

    /// The active derivation mode
    pub fn mode(&self) -> DerivationMode {
        self.mode
    }

    /// The hash algorithm used by every mode
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    pub(crate) fn set_mode(&mut self, mode: DerivationMode) {
        self.mode = mode;
    }

    pub(crate) fn set_hash_algorithm(&mut self, hash: HashAlgorithm) {
        self.hash = hash;
    }

    pub(crate) fn set_prepend(&mut self, prepend: Option<Vec<u8>>) {
        self.prepend = prepend;
    }

    pub(crate) fn set_append(&mut self, append: Option<Vec<u8>>) {
        self.append = append;
    }

    pub(crate) fn set_hmac_key(&mut self, hmac_key: Option<Vec<u8>>) {
        if let Some(old) = self.hmac_key.as_mut() {
            old.zeroize();
        }
        self.hmac_key = hmac_key;
    }

    pub(crate) fn set_label(&mut self, label: Option<Vec<u8>>) {
        self.label = label;
    }

    pub(crate) fn set_seed(&mut self, seed: Option<Vec<u8>>) {
        self.seed = seed;
    }

    pub(crate) fn set_output_length(&mut self, output_length: Option<usize>) {
        self.output_length = output_length;
    }

    /// Bytes hashed before the secret, empty when unset
    pub fn prepend(&self) -> &[u8] {
        self.prepend.as_deref().unwrap_or(&[])
    }

    /// Bytes hashed after the secret, empty when unset
    pub fn append(&self) -> &[u8] {
        self.append.as_deref().unwrap_or(&[])
    }

    /// Explicit HMAC key, if one was set
    pub fn hmac_key(&self) -> Option<&[u8]> {
        self.hmac_key.as_deref()
    }

    /// TLS PRF label, if set
    pub fn label(&self) -> Option<&[u8]> {
        self.label.as_deref()
    }

    /// TLS PRF seed, if set
    pub fn seed(&self) -> Option<&[u8]> {
        self.seed.as_deref()
    }

    /// Requested TLS PRF output length in bytes, if set
    pub fn output_length(&self) -> Option<usize> {
        self.output_length
    }

    /// Checks that every field the active mode requires is present and
    /// usable, before any secret is computed
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            DerivationMode::Hash | DerivationMode::Hmac => Ok(()),
            DerivationMode::TlsPrf => {
                if self.label.is_none() {
                    return Err(Error::InvalidConfig(
                        "TLS PRF requires a label".to_string(),
                    ));
                }
                match self.seed.as_deref() {
                    None => {
                        return Err(Error::InvalidConfig(
                            "TLS PRF requires a seed".to_string(),
                        ));
                    }
                    Some([]) => {
                        // An empty seed would collapse the A-chain
                        return Err(Error::InvalidConfig(
                            "TLS PRF seed must not be empty".to_string(),
                        ));
                    }
                    Some(_) => {}
                }
                match self.output_length {
                    None => Err(Error::InvalidConfig(
                        "TLS PRF requires an output length".to_string(),
                    )),
                    Some(0) => Err(Error::InvalidConfig(
                        "TLS PRF output length must be positive".to_string(),
                    )),
                    Some(_) => Ok(()),
                }
            }
        }
    }
}

impl Drop for DerivationConfig {
    fn drop(&mut self) {
        if let Some(key) = self.hmac_key.as_mut() {
            key.zeroize();
        }
    }
}

impl fmt::Debug for DerivationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationConfig")
            .field("mode", &self.mode)
            .field("hash", &self.hash)
            .field("prepend", &self.prepend)
            .field("append", &self.append)
            .field(
                "hmac_key",
                &self.hmac_key.as_ref().map(|k| format!("[{} bytes]", k.len())),
            )
            .field("label", &self.label)
            .field("seed", &self.seed)
            .field("output_length", &self.output_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config_is_hash_sha256() {
        let config = DerivationConfig::default();
        assert_eq!(config.mode(), DerivationMode::Hash);
        assert_eq!(config.hash_algorithm(), HashAlgorithm::Sha256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tls_prf_requires_label_seed_and_length() {
        let mut config = DerivationConfig::default();
        config.set_mode(DerivationMode::TlsPrf);
        assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));

        config.set_label(Some(b"label".to_vec()));
        assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));

        config.set_seed(Some(vec![0u8; 64]));
        assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));

        config.set_output_length(Some(48));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tls_prf_rejects_empty_seed_and_zero_length() {
        let mut config = DerivationConfig::tls_prf(HashAlgorithm::Sha256, b"label".to_vec(), vec![], 48);
        assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));

        config.set_seed(Some(vec![0u8; 64]));
        config.set_output_length(Some(0));
        assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_label_is_permitted() {
        let config = DerivationConfig::tls_prf(HashAlgorithm::Sha256, vec![], vec![0u8; 64], 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_equal_configs_compare_equal() {
        let a = DerivationConfig::hmac(HashAlgorithm::Sha384)
            .with_prepend(b"p".to_vec())
            .with_hmac_key(b"k".to_vec());
        let b = DerivationConfig::hmac(HashAlgorithm::Sha384)
            .with_prepend(b"p".to_vec())
            .with_hmac_key(b"k".to_vec());
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_redacts_hmac_key() {
        let config =
            DerivationConfig::hmac(HashAlgorithm::Sha256).with_hmac_key(b"top secret".to_vec());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top secret"));
        assert!(rendered.contains("10 bytes"));
    }
}
