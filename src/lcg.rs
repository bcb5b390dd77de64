//! Park–Miller "minimal standard" Lehmer generator.
//!
//! This is the only source of pseudo-randomness in the derivation. It is
//! fully predictable from two consecutive outputs and must not be mistaken
//! for a cryptographic generator.

use crate::error::DeriveError;

/// 2^31 - 1.
pub const MODULUS: u64 = 2_147_483_647;
pub const MULTIPLIER: u64 = 16_807;

/// One generator per derivation, consumed in strict call order by the
/// composition pass and then the shuffle.
#[derive(Debug)]
pub struct LcgStream {
    state: u64,
}

impl LcgStream {
    /// Seeds the stream with the raw 32-bit seed.
    ///
    /// The seed is not reduced modulo [`MODULUS`] up front; the first draw
    /// does that. Seeds that are multiples of the modulus would pin the
    /// state at zero forever and are rejected.
    pub fn new(seed: u32) -> Result<Self, DeriveError> {
        if u64::from(seed) % MODULUS == 0 {
            return Err(DeriveError::DegenerateSeed { seed });
        }
        Ok(Self {
            state: u64::from(seed),
        })
    }

    /// Advances the state and returns it.
    pub fn next_value(&mut self) -> u32 {
        // seed < 2^32 and MULTIPLIER < 2^15, so the product fits in 47 bits.
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as u32
    }

    /// Advances the state and returns it reduced modulo `m`.
    ///
    /// # Panics
    ///
    /// Panics if `m` is zero.
    pub fn next_index(&mut self, m: usize) -> usize {
        assert!(m > 0, "LcgStream::next_index called with m = 0");
        self.next_value() as usize % m
    }
}
