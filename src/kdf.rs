//! Key derivation functions
//!
//! Implements the three derivation recipes that turn a raw ECDH shared
//! secret into usable key material:
//!
//! - **Hash**: `H(prepend || secret || append)` — the concatenation KDF
//!   shape from NIST SP 800-56A
//! - **HMAC**: `HMAC_K(prepend || secret || append)`, keyed with an explicit
//!   key or with the secret itself
//! - **TLS PRF**: the TLS 1.2 single-hash P_hash expansion, producing a
//!   caller-chosen number of bytes
//!
//! All three are deterministic pure functions of `(secret, config)`. The
//! secret is read exactly once per call and never retained or logged.

use crate::config::{DerivationConfig, DerivationMode};
use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use tracing::trace;

/// Derives key material from a shared secret according to `config`
///
/// The config is validated first, so a misconfigured call fails with
/// [`Error::InvalidConfig`](crate::Error::InvalidConfig) before touching the
/// secret.
pub fn derive_key_material(secret: &[u8], config: &DerivationConfig) -> Result<Vec<u8>> {
    config.validate()?;
    trace!(
        mode = ?config.mode(),
        hash = %config.hash_algorithm(),
        "deriving key material"
    );
    match config.mode() {
        DerivationMode::Hash => derive_hash(secret, config),
        DerivationMode::Hmac => derive_hmac(secret, config),
        DerivationMode::TlsPrf => {
            // validate() guarantees these are present
            let label = config
                .label()
                .ok_or_else(|| Error::InvalidConfig("TLS PRF requires a label".to_string()))?;
            let seed = config
                .seed()
                .ok_or_else(|| Error::InvalidConfig("TLS PRF requires a seed".to_string()))?;
            let output_length = config.output_length().ok_or_else(|| {
                Error::InvalidConfig("TLS PRF requires an output length".to_string())
            })?;
            tls_prf(config.hash_algorithm(), secret, label, seed, output_length)
        }
    }
}

/// Hash mode: a single digest over `prepend || secret || append`
fn derive_hash(secret: &[u8], config: &DerivationConfig) -> Result<Vec<u8>> {
    Ok(config
        .hash_algorithm()
        .digest(&[config.prepend(), secret, config.append()]))
}

/// HMAC mode: `HMAC_K(prepend || secret || append)`
///
/// With no explicit key the secret serves double duty as both the HMAC key
/// and part of the covered data.
fn derive_hmac(secret: &[u8], config: &DerivationConfig) -> Result<Vec<u8>> {
    let key = config.hmac_key().unwrap_or(secret);
    config
        .hash_algorithm()
        .hmac(key, &[config.prepend(), secret, config.append()])
}

/// TLS 1.2 style PRF expansion, all HMACs keyed with the shared secret
///
/// ```text
/// A(0) = seed
/// A(i) = HMAC_secret(A(i-1))
/// P(i) = HMAC_secret(A(i) || label || seed)
/// output = (P(1) || P(2) || ...)[..output_length]
/// ```
pub fn tls_prf(
    hash: HashAlgorithm,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
    output_length: usize,
) -> Result<Vec<u8>> {
    if seed.is_empty() {
        return Err(Error::InvalidConfig(
            "TLS PRF seed must not be empty".to_string(),
        ));
    }
    if output_length == 0 {
        return Err(Error::InvalidConfig(
            "TLS PRF output length must be positive".to_string(),
        ));
    }

    let mut output = Vec::with_capacity(output_length + hash.output_size());
    let mut a = hash.hmac(secret, &[seed])?;
    loop {
        let block = hash.hmac(secret, &[a.as_slice(), label, seed])?;
        output.extend_from_slice(&block);
        if output.len() >= output_length {
            break;
        }
        a = hash.hmac(secret, &[a.as_slice()])?;
    }

    // Truncate to the exact requested length
    output.truncate(output_length);
    Ok(output)
}
