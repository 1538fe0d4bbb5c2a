//! Key agreement session
//!
//! [`KeyAgreementSession`] orchestrates secret agreement and key derivation
//! behind two equivalent call shapes:
//!
//! 1. **Explicit** — `derive_key_from_hash`, `derive_key_from_hmac` and
//!    `derive_key_from_tls_prf` take every derivation parameter per call.
//! 2. **Stateful** — `set_*` methods accumulate configuration on the
//!    session, then `derive_key_material` reads the current fields.
//!
//! Both shapes funnel into the same pure derivation engine with the same
//! [`DerivationConfig`](crate::DerivationConfig) value, so equivalent inputs
//! produce byte-identical output by construction.
//!
//! The setters take `&mut self`, which makes the single-writer precondition
//! a compile-time property; callers sharing a session across threads must
//! wrap it in their own lock.

use crate::agreement::{AgreementKey, PublicKey};
use crate::config::{DerivationConfig, DerivationMode};
use crate::curve::Curve;
use crate::error::Result;
use crate::hash::HashAlgorithm;
use crate::kdf;
use crate::local_key::LocalKey;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// An ECDH key agreement session over a single local private key
///
/// Fresh sessions default to [`DerivationMode::Hash`] with SHA-256.
#[derive(Debug)]
pub struct KeyAgreementSession {
    key: Box<dyn AgreementKey>,
    /// Single-slot cache for the exported public key; filled on first
    /// access, identical Arc returned for the session's lifetime
    cached_public: OnceCell<Arc<PublicKey>>,
    config: DerivationConfig,
}

impl KeyAgreementSession {
    /// Creates a session over an existing agreement key (software or
    /// keystore-backed)
    pub fn new(key: impl AgreementKey + 'static) -> Self {
        debug!(curve = %key.curve(), "creating key agreement session");
        Self {
            key: Box::new(key),
            cached_public: OnceCell::new(),
            config: DerivationConfig::default(),
        }
    }

    /// Generates a fresh software key on `curve` and wraps it in a session
    pub fn generate(curve: Curve) -> Self {
        Self::new(LocalKey::generate(curve))
    }

    /// The curve of the underlying key
    pub fn curve(&self) -> Curve {
        self.key.curve()
    }

    /// Size of the underlying key in bits (256/384/521)
    pub fn key_size(&self) -> u32 {
        self.key.curve().key_size()
    }

    /// The session's public key
    ///
    /// Materialized on first access and cached; every subsequent call
    /// returns a clone of the same `Arc`, so two reads observe identical
    /// object identity (`Arc::ptr_eq`) for the life of the session.
    pub fn public_key(&self) -> Result<Arc<PublicKey>> {
        let cached = self
            .cached_public
            .get_or_try_init(|| self.key.public_key().map(Arc::new))?;
        Ok(Arc::clone(cached))
    }

    // --- stateful configuration surface ---

    /// Sets the derivation mode used by [`derive_key_material`](Self::derive_key_material)
    pub fn set_mode(&mut self, mode: DerivationMode) {
        self.config.set_mode(mode);
    }

    /// Sets the hash algorithm used by all modes
    pub fn set_hash_algorithm(&mut self, hash: HashAlgorithm) {
        self.config.set_hash_algorithm(hash);
    }

    /// Sets or clears the bytes hashed before the secret (Hash and HMAC modes)
    pub fn set_secret_prepend(&mut self, prepend: Option<Vec<u8>>) {
        self.config.set_prepend(prepend);
    }

    /// Sets or clears the bytes hashed after the secret (Hash and HMAC modes)
    pub fn set_secret_append(&mut self, append: Option<Vec<u8>>) {
        self.config.set_append(append);
    }

    /// Sets or clears the explicit HMAC key (HMAC mode)
    pub fn set_hmac_key(&mut self, hmac_key: Option<Vec<u8>>) {
        self.config.set_hmac_key(hmac_key);
    }

    /// Sets or clears the TLS PRF label
    pub fn set_label(&mut self, label: Option<Vec<u8>>) {
        self.config.set_label(label);
    }

    /// Sets or clears the TLS PRF seed
    pub fn set_seed(&mut self, seed: Option<Vec<u8>>) {
        self.config.set_seed(seed);
    }

    /// Sets or clears the TLS PRF output length in bytes
    pub fn set_output_length(&mut self, output_length: Option<usize>) {
        self.config.set_output_length(output_length);
    }

    /// The session's current derivation configuration
    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    // --- derivation, stateful shape ---

    /// Derives key material from the current session configuration
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig)
    /// before computing any secret when a field the active mode requires is
    /// unset.
    pub fn derive_key_material(&self, peer: &PublicKey) -> Result<Vec<u8>> {
        self.derive_with(peer, &self.config)
    }

    // --- derivation, explicit shape ---

    /// Derives key material as `Hash(prepend || secret || append)`
    pub fn derive_key_from_hash(
        &self,
        peer: &PublicKey,
        hash: HashAlgorithm,
        prepend: Option<&[u8]>,
        append: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let mut config = DerivationConfig::hash(hash);
        if let Some(prepend) = prepend {
            config = config.with_prepend(prepend);
        }
        if let Some(append) = append {
            config = config.with_append(append);
        }
        self.derive_with(peer, &config)
    }

    /// Derives key material as `HMAC_K(prepend || secret || append)`,
    /// keyed with `hmac_key` or with the secret itself when `None`
    pub fn derive_key_from_hmac(
        &self,
        peer: &PublicKey,
        hash: HashAlgorithm,
        hmac_key: Option<&[u8]>,
        prepend: Option<&[u8]>,
        append: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let mut config = DerivationConfig::hmac(hash);
        if let Some(hmac_key) = hmac_key {
            config = config.with_hmac_key(hmac_key);
        }
        if let Some(prepend) = prepend {
            config = config.with_prepend(prepend);
        }
        if let Some(append) = append {
            config = config.with_append(append);
        }
        self.derive_with(peer, &config)
    }

    /// Derives `output_length` bytes via the TLS 1.2 PRF, using the
    /// session's current hash algorithm
    pub fn derive_key_from_tls_prf(
        &self,
        peer: &PublicKey,
        label: &[u8],
        seed: &[u8],
        output_length: usize,
    ) -> Result<Vec<u8>> {
        let config = DerivationConfig::tls_prf(
            self.config.hash_algorithm(),
            label,
            seed,
            output_length,
        );
        self.derive_with(peer, &config)
    }

    /// Common path for both shapes: validate, agree, derive
    ///
    /// The shared secret lives only for the duration of this call and is
    /// zeroed when it drops, on success and failure alike.
    fn derive_with(&self, peer: &PublicKey, config: &DerivationConfig) -> Result<Vec<u8>> {
        config.validate()?;
        let shared = self.key.agree(peer)?;
        kdf::derive_key_material(shared.as_bytes(), config)
    }
}
