//! Error handling for ECDH key agreement
//!
//! This module provides error types and utilities for key agreement and
//! key derivation operations.

use crate::curve::Curve;
use thiserror::Error;

/// Type alias for Results with key agreement errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for key agreement and key derivation
#[derive(Error, Debug)]
pub enum Error {
    /// A key handle is invalid, malformed, or not on the expected curve
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Local and peer keys belong to different curves
    #[error("Curve mismatch: local key is {local}, peer key is {peer}")]
    CurveMismatch {
        /// Curve of the local private key
        local: Curve,
        /// Curve of the peer public key
        peer: Curve,
    },

    /// A required derivation field is missing or set inconsistently
    /// with the active derivation mode
    #[error("Invalid derivation config: {0}")]
    InvalidConfig(String),

    /// The requested algorithm is not supported by the underlying primitives
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Failure in an underlying cryptographic primitive
    #[error("Cryptography error: {0}")]
    Cryptography(String),
}
