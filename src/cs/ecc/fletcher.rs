//! Fletcher checksum over bit sequences.
//!
//! The input bits are zero-padded on the right to a multiple of the block size
//! (8, 16 or 32 bits) and each block is read as a big-endian unsigned integer.
//! Two running sums, each reduced modulo 255, are folded over the blocks and
//! packed as `(sum2 << 8) | sum1`.
//!
//! The second sum weights each block by its distance from the end, so the
//! checksum changes when blocks are reordered. Both sides of a comparison must
//! therefore checksum the exact same bit ordering.
//!
//! **Note**: Fletcher checksums detect accidental corruption only; they are not
//! cryptographically secure.
//!
//! # Examples
//!
//! ```
//! use hamcheck::ecc::bits::parse_bits;
//! use hamcheck::ecc::fletcher_checksum;
//!
//! let data = parse_bits("1010").unwrap();
//! let padded = parse_bits("10100000").unwrap();
//! assert_eq!(
//!     fletcher_checksum(&data, 8).unwrap(),
//!     fletcher_checksum(&padded, 8).unwrap()
//! );
//! ```

use crate::cs::ecc::{BitStr, ChecksumAlgorithm, Result};
use crate::error::Error;
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};

/// Modulus applied to both running sums
const MODULUS: u64 = 255;

/// Width of the blocks the input is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockSize {
    /// 8-bit blocks
    Bits8,
    /// 16-bit blocks
    #[default]
    Bits16,
    /// 32-bit blocks
    Bits32,
}

impl BlockSize {
    /// Number of bits per block
    pub fn bits(self) -> usize {
        match self {
            BlockSize::Bits8 => 8,
            BlockSize::Bits16 => 16,
            BlockSize::Bits32 => 32,
        }
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = Error;

    fn try_from(bits: usize) -> Result<Self> {
        match bits {
            8 => Ok(BlockSize::Bits8),
            16 => Ok(BlockSize::Bits16),
            32 => Ok(BlockSize::Bits32),
            other => Err(Error::invalid_parameter(
                "block_size",
                format!("{} (must be 8, 16 or 32)", other),
            )),
        }
    }
}

/// Fletcher checksum with a fixed block size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fletcher {
    block_size: BlockSize,
}

impl Fletcher {
    /// Create a checksum over blocks of the given size
    pub fn new(block_size: BlockSize) -> Self {
        Self { block_size }
    }

    /// Get the block size
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }
}

impl ChecksumAlgorithm for Fletcher {
    fn calculate(&self, data: &BitStr) -> u16 {
        let width = self.block_size.bits();
        let mut sum1 = 0u64;
        let mut sum2 = 0u64;

        for chunk in data.chunks(width) {
            // A short final chunk is the zero-padded block shifted into place
            let value = chunk.load_be::<u32>() as u64;
            let block = value << (width - chunk.len());
            sum1 = (sum1 + block) % MODULUS;
            sum2 = (sum2 + sum1) % MODULUS;
        }

        ((sum2 << 8) | sum1) as u16
    }

    fn name(&self) -> &str {
        match self.block_size {
            BlockSize::Bits8 => "Fletcher/8",
            BlockSize::Bits16 => "Fletcher/16",
            BlockSize::Bits32 => "Fletcher/32",
        }
    }
}

impl Display for Fletcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}-bit blocks)", self.name(), self.block_size.bits())
    }
}

/// Calculate the Fletcher checksum of `data` over `block_size`-bit blocks.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `block_size` is not 8, 16 or 32.
pub fn fletcher_checksum(data: &BitStr, block_size: usize) -> Result<u16> {
    let block_size = BlockSize::try_from(block_size)?;
    Ok(Fletcher::new(block_size).calculate(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::bits::{parse_bits, text_to_bits};
    use crate::cs::ecc::Bits;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Straightforward fold over explicitly padded blocks
    fn reference(data: &str, block_size: usize) -> u16 {
        let mut padded = data.to_string();
        while padded.len() % block_size != 0 {
            padded.push('0');
        }
        let (mut sum1, mut sum2) = (0u64, 0u64);
        for i in (0..padded.len()).step_by(block_size) {
            let value = u64::from_str_radix(&padded[i..i + block_size], 2).unwrap();
            sum1 = (sum1 + value) % 255;
            sum2 = (sum2 + sum1) % 255;
        }
        ((sum2 << 8) | sum1) as u16
    }

    #[test]
    fn test_padding() {
        let short = parse_bits("1010").unwrap();
        let padded = parse_bits("10100000").unwrap();
        assert_eq!(
            fletcher_checksum(&short, 8).unwrap(),
            fletcher_checksum(&padded, 8).unwrap()
        );
        // 0b10100000 = 160, sum1 = 160, sum2 = 160
        assert_eq!(fletcher_checksum(&short, 8).unwrap(), (160 << 8) | 160);
    }

    #[test]
    fn test_known_value() {
        // "abcde" is the classic Fletcher-16 test vector
        let data = text_to_bits("abcde");
        assert_eq!(fletcher_checksum(&data, 8).unwrap(), 0xC8F0);
    }

    #[test]
    fn test_empty_data() {
        for size in [8, 16, 32] {
            assert_eq!(fletcher_checksum(&Bits::new(), size).unwrap(), 0);
        }
    }

    #[test]
    fn test_invalid_block_size() {
        let data = parse_bits("1010").unwrap();
        for size in [0, 4, 12, 24, 64] {
            let err = fletcher_checksum(&data, size).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidParameter {
                    name: "block_size",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_matches_reference() {
        let mut rng = StdRng::seed_from_u64(3);
        for len in [1, 7, 8, 9, 15, 16, 17, 31, 32, 33, 100, 257] {
            let text: String = (0..len)
                .map(|_| if rng.gen::<bool>() { '1' } else { '0' })
                .collect();
            let bits = parse_bits(&text).unwrap();
            for size in [8, 16, 32] {
                assert_eq!(
                    fletcher_checksum(&bits, size).unwrap(),
                    reference(&text, size),
                    "len = {}, block = {}",
                    len,
                    size
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let data = parse_bits("1100101011110000101").unwrap();
        let first = fletcher_checksum(&data, 16).unwrap();
        let second = fletcher_checksum(&data.clone(), 16).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_bit_sensitivity() {
        let mut rng = StdRng::seed_from_u64(42);
        let checksum = Fletcher::new(BlockSize::Bits16);
        let mut unchanged = 0;
        let trials = 1000;

        for _ in 0..trials {
            let len = rng.gen_range(16..256);
            let data: Bits = (0..len).map(|_| rng.gen::<bool>()).collect();
            let pos = rng.gen_range(0..len);
            let mut flipped = data.clone();
            let bit = !flipped[pos];
            flipped.set(pos, bit);

            if checksum.calculate(&data) == checksum.calculate(&flipped) {
                unchanged += 1;
            }
        }

        // Only a flip that moves a block by a multiple of 255 goes unnoticed
        assert!(unchanged * 100 < trials, "{} of {} flips undetected", unchanged, trials);
    }

    #[test]
    fn test_order_sensitive() {
        let ab = parse_bits("0000000100000010").unwrap();
        let ba = parse_bits("0000001000000001").unwrap();
        let checksum = Fletcher::new(BlockSize::Bits8);
        assert_ne!(checksum.calculate(&ab), checksum.calculate(&ba));
    }

    #[test]
    fn test_block_size_conversion() {
        assert_eq!(BlockSize::try_from(8).unwrap(), BlockSize::Bits8);
        assert_eq!(BlockSize::try_from(16).unwrap(), BlockSize::Bits16);
        assert_eq!(BlockSize::try_from(32).unwrap().bits(), 32);
        assert_eq!(BlockSize::default(), BlockSize::Bits16);
    }

    #[test]
    fn test_verify_and_display() {
        let data = parse_bits("0110011").unwrap();
        let checksum = Fletcher::default();
        let value = checksum.calculate(&data);
        assert!(checksum.verify(&data, value));
        assert!(!checksum.verify(&data, value.wrapping_add(1)));
        assert_eq!(checksum.to_string(), "Fletcher/16 (16-bit blocks)");
    }
}
