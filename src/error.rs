//! Error types for pairpass.

use thiserror::Error;

/// Failures of the derivation pipeline itself.
///
/// Any of these aborts the whole derivation; no partial password is
/// ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// The hash capability failed or is unavailable.
    #[error("hash primitive failed: {0}")]
    Hash(String),

    /// The hash capability returned something that is not a hex digest.
    #[error("hash primitive returned a malformed digest ({digest_len} chars)")]
    MalformedDigest { digest_len: usize },

    /// The seed is a multiple of the LCG modulus, which pins the
    /// generator at zero.
    #[error("derived seed {seed} is degenerate for the LCG")]
    DegenerateSeed { seed: u32 },
}

/// Input rejected before the core is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("secret {index} cannot be empty")]
    EmptySecret { index: usize },

    #[error("secret {index} is shorter than {min} characters")]
    SecretTooShort { index: usize, min: usize },
}
