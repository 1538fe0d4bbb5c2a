//! ECDH key agreement with pluggable key derivation
//!
//! This crate computes an Elliptic-Curve Diffie-Hellman shared secret over
//! the NIST curves (P-256, P-384, P-521) and turns it into symmetric key
//! material via one of three standardized derivation recipes: a plain hash,
//! an HMAC, or the TLS 1.2 PRF.
//!
//! Derivation parameters can be passed explicitly per call, or set once on a
//! [`KeyAgreementSession`] and reused through a single parameterless derive —
//! the two shapes are guaranteed to produce byte-identical output for
//! equivalent inputs.
//!
//! ```
//! use ecdh_agreement::{Curve, HashAlgorithm, KeyAgreementSession};
//!
//! # fn main() -> ecdh_agreement::Result<()> {
//! let alice = KeyAgreementSession::generate(Curve::P256);
//! let bob = KeyAgreementSession::generate(Curve::P256);
//!
//! let k1 = alice.derive_key_from_hash(&*bob.public_key()?, HashAlgorithm::Sha256, None, None)?;
//! let k2 = bob.derive_key_from_hash(&*alice.public_key()?, HashAlgorithm::Sha256, None, None)?;
//! assert_eq!(k1, k2);
//! # Ok(())
//! # }
//! ```

/// Key agreement trait and shared secret container
pub mod agreement;

/// Derivation configuration
pub mod config;

/// Curve identifiers
pub mod curve;

/// Error types
pub mod error;

/// Hash and HMAC primitives
pub mod hash;

/// Key derivation functions
pub mod kdf;

/// Software key backend
pub mod local_key;

/// Key agreement session
pub mod session;

// Re-export key types for convenience
pub use agreement::{AgreementKey, PublicKey, SharedSecret};
pub use config::{DerivationConfig, DerivationMode};
pub use curve::Curve;
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use local_key::LocalKey;
pub use session::KeyAgreementSession;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
