//! Hash capability consumed by the salt and seed derivations.

use crate::error::DeriveError;
use sha2::{Digest, Sha256};

/// A 256-bit hash returning its digest as 64 lowercase hex characters.
///
/// The derivation only ever reads a prefix of the digest, so test doubles
/// can return fixed strings.
pub trait HashPrimitive: Send + Sync {
    fn digest(&self, input: &[u8]) -> Result<String, DeriveError>;
}

/// SHA-256, the hash every published pairpass output is defined against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hex;

impl HashPrimitive for Sha256Hex {
    fn digest(&self, input: &[u8]) -> Result<String, DeriveError> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        Ok(hex::encode(hasher.finalize()))
    }
}

impl<H: HashPrimitive + ?Sized> HashPrimitive for &H {
    fn digest(&self, input: &[u8]) -> Result<String, DeriveError> {
        (**self).digest(input)
    }
}
