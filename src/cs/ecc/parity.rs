//! Parity-bit planning for power-of-two Hamming codes.
//!
//! With `r` parity bits the syndrome can take `2^r` values. One of them means
//! "no error", the rest must address each of the `m + r` codeword positions,
//! which gives the Hamming bound `m + r + 1 <= 2^r`.

use crate::cs::ecc::Result;
use crate::error::Error;

/// Largest parity-bit count tried before `2^r` would overflow a `usize`.
const MAX_PARITY_BITS: u32 = usize::BITS - 1;

/// Returns the minimum number of parity bits needed to protect `m` data bits.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if no count up to the search bound
/// satisfies the Hamming bound.
///
/// # Example
/// ```
/// use hamcheck::ecc::calculate_parity_bits;
///
/// assert_eq!(calculate_parity_bits(4).unwrap(), 3);
/// assert_eq!(calculate_parity_bits(11).unwrap(), 4);
/// ```
pub fn calculate_parity_bits(m: usize) -> Result<usize> {
    for r in 0..=MAX_PARITY_BITS {
        let capacity = 1usize << r;
        let needed = m
            .checked_add(r as usize + 1)
            .ok_or_else(|| Error::Configuration(format!("{} data bits overflow", m)))?;
        if needed <= capacity {
            return Ok(r as usize);
        }
    }

    Err(Error::Configuration(format!(
        "no parity-bit count up to {} covers {} data bits",
        MAX_PARITY_BITS, m
    )))
}

/// Parity-bit count carried by a full codeword of `n` bits.
///
/// This is the number of power-of-two positions in `1..=n`. For perfect
/// lengths (`n = 2^r - 1`) it equals `floor(log2(n + 1))`; for shortened
/// codewords it still counts the top parity bit, which the encoder placed.
pub fn parity_bits_for_codeword(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        n.ilog2() as usize + 1
    }
}

/// Whether the 1-based position `pos` holds a parity bit.
pub fn is_parity_position(pos: usize) -> bool {
    pos >= 1 && pos & (pos - 1) == 0
}
