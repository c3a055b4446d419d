//! Noisy binary channel for exercising the codec.
//!
//! Flips transmitted bits either independently with a fixed probability
//! (binary symmetric channel) or at an exact number of distinct positions.
//! All randomness comes from a seeded ChaCha8 RNG, so a given seed and input
//! always produce the same corruption.

use crate::cs::ecc::{BitStr, Bits, Result};
use crate::error::Error;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A corrupted transmission and the 1-based positions that were flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corrupted {
    /// Bits as delivered
    pub bits: Bits,
    /// Flipped positions, ascending
    pub flipped: Vec<usize>,
}

/// Seeded bit-flipping channel
#[derive(Debug, Clone)]
pub struct NoisyChannel {
    flip_probability: f64,
    rng: ChaCha8Rng,
}

impl NoisyChannel {
    /// Create a channel flipping each bit with `flip_probability`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless the probability is in `[0, 1]`.
    pub fn new(flip_probability: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&flip_probability) {
            return Err(Error::invalid_parameter(
                "flip_probability",
                flip_probability,
            ));
        }

        Ok(Self {
            flip_probability,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// A channel that never flips bits on its own; useful with [`flip_exact`](Self::flip_exact).
    pub fn noiseless(seed: u64) -> Self {
        Self {
            flip_probability: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Per-bit flip probability
    pub fn flip_probability(&self) -> f64 {
        self.flip_probability
    }

    /// Send bits through the channel, flipping each independently.
    pub fn transmit(&mut self, bits: &BitStr) -> Corrupted {
        let mut out = bits.to_bitvec();
        let mut flipped = Vec::new();

        for idx in 0..out.len() {
            if self.rng.gen_bool(self.flip_probability) {
                let bit = !out[idx];
                out.set(idx, bit);
                flipped.push(idx + 1);
            }
        }

        Corrupted { bits: out, flipped }
    }

    /// Flip exactly `count` distinct bits chosen uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `count` exceeds the number of bits.
    pub fn flip_exact(&mut self, bits: &BitStr, count: usize) -> Result<Corrupted> {
        if count > bits.len() {
            return Err(Error::InvalidInput(format!(
                "cannot flip {} of {} bits",
                count,
                bits.len()
            )));
        }

        let mut flipped: Vec<usize> = sample(&mut self.rng, bits.len(), count)
            .into_iter()
            .map(|idx| idx + 1)
            .collect();
        flipped.sort_unstable();

        let mut out = bits.to_bitvec();
        for &pos in &flipped {
            let bit = !out[pos - 1];
            out.set(pos - 1, bit);
        }

        Ok(Corrupted { bits: out, flipped })
    }
}
