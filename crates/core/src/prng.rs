//! Randomness for composition runs.
//!
//! [`RandomSource`] is the seam the composer draws through, so tests can
//! script exact draws. [`Xorshift64`] is the production source: fast,
//! seedable, and identical across platforms (pure integer arithmetic in the
//! core algorithm).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Uniform reals in [0, 1) and uniform integers in [0, n).
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed usize in [0, n). `n` must be non-zero.
    fn next_below(&mut self, n: usize) -> usize;

    /// Returns `low + u * (high - low)` for a fresh `u` in [0, 1).
    fn random_real(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_below(&mut self, n: usize) -> usize {
        (**self).next_below(n)
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Draws a fresh high-entropy seed from a v4 UUID.
    ///
    /// Every call yields a different value, so separate runs produce
    /// different compositions unless a seed is pinned explicitly.
    pub fn entropy_seed() -> u64 {
        let bits = Uuid::new_v4().as_u128();
        (bits as u64) ^ ((bits >> 64) as u64)
    }

    /// Creates a PRNG seeded from [`Xorshift64::entropy_seed`].
    pub fn from_entropy() -> Self {
        Self::new(Self::entropy_seed())
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// Simple modulo reduction; the bias is negligible at 64-bit state width.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` divided by 2^53.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn next_below(&mut self, n: usize) -> usize {
        self.next_usize(n)
    }
}
