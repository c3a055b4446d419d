//! Single-error-correcting Hamming codec for payloads of any length.
//!
//! A payload of `m` bits gets the smallest `r` with `m + r + 1 <= 2^r` parity bits.
//! In the 1-based codeword, positions 1, 2, 4, 8, ... hold parity and the rest hold
//! data in order. Parity bit `p` makes the XOR over every position with bit `p` set
//! even, so on decode the sum of the failing checks is the position of a lone
//! flipped bit.
//!
//! Most payload lengths give a shortened codeword (`n < 2^r - 1`). Its decoder
//! counts parity bits as the powers of two in `1..=n` rather than deriving them
//! from `n + 1`, otherwise the top parity bit of e.g. a 9-bit codeword is skipped.
//!
//! A shortened codeword hit by two errors can produce a syndrome above `n`. There
//! is no bit to flip then: [`Decoded::error_position`] keeps the syndrome,
//! [`Decoded::is_uncorrectable`] reports it and the payload comes back as received.
//! Other double errors land inside the codeword and flip an innocent bit. The
//! syndrome alone can't tell, so [`Receiver`](crate::cs::ecc::Receiver) compares a
//! Fletcher checksum of the corrected payload against the sender's.

use crate::cs::ecc::bits::to_bit_string;
use crate::cs::ecc::parity::{calculate_parity_bits, is_parity_position, parity_bits_for_codeword};
use crate::cs::ecc::{BitStr, Bits, Result};
use crate::error::Error;
use bitvec::prelude::*;
use log::{debug, trace, warn};

/// Result of decoding one codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Data bits after any correction, in ascending position order
    pub payload: Bits,
    /// Syndrome of the received codeword: 0 if every parity check passed,
    /// otherwise the 1-based position that was flipped back.
    ///
    /// Can exceed `codeword_len` when the codeword was uncorrectable (see
    /// [`Decoded::is_uncorrectable`]); it is not a valid index then.
    pub error_position: usize,
    /// Length of the codeword the payload was extracted from
    pub codeword_len: usize,
}

impl Decoded {
    /// Whether every parity check passed.
    pub fn is_clean(&self) -> bool {
        self.error_position == 0
    }

    /// Whether a single bit was flipped back.
    pub fn is_corrected(&self) -> bool {
        self.error_position != 0 && !self.is_uncorrectable()
    }

    /// Whether the syndrome names a position past the end of the codeword.
    ///
    /// Only reachable on shortened codewords hit by more than one error; the
    /// payload is returned exactly as received.
    pub fn is_uncorrectable(&self) -> bool {
        self.error_position > self.codeword_len
    }
}

/// Hamming single-error-correcting codec with parity bits at power-of-two positions.
///
/// The codec carries no configuration: the payload length fixes the number of
/// parity bits on encode and the codeword length fixes it on decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingCodec;

impl HammingCodec {
    /// Creates a new codec.
    pub fn new() -> Self {
        HammingCodec
    }

    /// Encodes a payload, inserting parity bits at every power-of-two position.
    ///
    /// # Arguments
    ///
    /// * `payload` - Data bits to protect
    ///
    /// # Returns
    ///
    /// The codeword of length `m + r`, or an error if no parity-bit count fits.
    /// An empty payload encodes to an empty codeword.
    pub fn encode(&self, payload: &BitStr) -> Result<Bits> {
        let m = payload.len();
        let r = calculate_parity_bits(m)?;
        let n = m + r;

        let mut codeword = bitvec![u8, Msb0; 0; n];

        // Data bits fill the non-parity positions in order
        let mut data = payload.iter().by_vals();
        for pos in 1..=n {
            if !is_parity_position(pos) {
                if let Some(bit) = data.next() {
                    codeword.set(pos - 1, bit);
                }
            }
        }

        // Parity bits are still zero, so each group XOR is the parity to store
        for i in 0..r {
            let parity_pos = 1 << i;
            let parity = Self::group_parity(&codeword, parity_pos);
            codeword.set(parity_pos - 1, parity);
        }

        Ok(codeword)
    }

    /// Decodes a codeword, correcting at most one flipped bit.
    ///
    /// # Arguments
    ///
    /// * `codeword` - Received data and parity bits, interleaved at power-of-two positions
    ///
    /// # Returns
    ///
    /// The payload after correction and the 1-based position that was flipped
    /// (0 if none), or a validation error for an empty codeword.
    pub fn decode(&self, codeword: &BitStr) -> Result<Decoded> {
        let n = codeword.len();
        if n == 0 {
            return Err(Error::validation("codeword is empty"));
        }

        let syndrome = Self::syndrome(codeword);
        trace!("syndrome {} over {} bits", syndrome, n);

        let mut corrected = codeword.to_bitvec();
        if syndrome != 0 {
            if syndrome <= n {
                let idx = syndrome - 1;
                let flipped = !corrected[idx];
                corrected.set(idx, flipped);
                debug!(
                    "corrected bit at position {}: {}",
                    syndrome,
                    to_bit_string(&corrected)
                );
            } else {
                warn!(
                    "syndrome {} exceeds codeword length {}, leaving codeword as received",
                    syndrome, n
                );
            }
        }

        Ok(Decoded {
            payload: Self::extract_payload(&corrected),
            error_position: syndrome,
            codeword_len: n,
        })
    }

    /// Computes the syndrome of a codeword: 0 if all parity checks pass,
    /// otherwise the sum of the positions of the failing parity bits.
    pub fn syndrome(codeword: &BitStr) -> usize {
        let r = parity_bits_for_codeword(codeword.len());

        let mut error_position = 0;
        for i in 0..r {
            let parity_pos = 1 << i;
            if Self::group_parity(codeword, parity_pos) {
                error_position += parity_pos;
            }
        }
        error_position
    }

    /// XOR of every bit whose 1-based position has `parity_pos` set.
    fn group_parity(codeword: &BitStr, parity_pos: usize) -> bool {
        (parity_pos..=codeword.len())
            .filter(|j| j & parity_pos != 0)
            .fold(false, |parity, j| parity ^ codeword[j - 1])
    }

    /// Collects the bits at non-power-of-two positions.
    fn extract_payload(codeword: &BitStr) -> Bits {
        codeword
            .iter()
            .by_vals()
            .enumerate()
            .filter(|(i, _)| !is_parity_position(i + 1))
            .map(|(_, bit)| bit)
            .collect()
    }
}

/// Encodes a payload with a fresh [`HammingCodec`]
pub fn hamming_encode(payload: &BitStr) -> Result<Bits> {
    HammingCodec::new().encode(payload)
}

/// Decodes a codeword with a fresh [`HammingCodec`]
pub fn hamming_decode(codeword: &BitStr) -> Result<Decoded> {
    HammingCodec::new().decode(codeword)
}
