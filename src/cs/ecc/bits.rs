//! Bit-string validation and conversion helpers.
//!
//! Transports hand the codec textual bit strings. Everything here turns those
//! strings into [`Bits`] (rejecting anything that is not `0`/`1`) and back,
//! and maps byte-aligned payloads to and from text.

use crate::cs::ecc::{BitStr, Bits, Result};
use crate::error::Error;
use bitvec::prelude::*;

/// Returns true if `input` is non-empty and made only of `0` and `1`.
pub fn is_binary(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b == b'0' || b == b'1')
}

/// Parses a textual bit string into owned bits.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the string is empty or contains any
/// character other than `0` and `1`.
pub fn parse_bits(input: &str) -> Result<Bits> {
    if input.is_empty() {
        return Err(Error::validation("bit string is empty"));
    }

    let mut bits = Bits::with_capacity(input.len());
    for (index, ch) in input.chars().enumerate() {
        match ch {
            '0' => bits.push(false),
            '1' => bits.push(true),
            other => {
                return Err(Error::validation(format!(
                    "unexpected symbol {:?} at index {}",
                    other, index
                )))
            }
        }
    }

    Ok(bits)
}

/// Renders bits as a string of `0` and `1` characters.
pub fn to_bit_string(bits: &BitStr) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

/// Converts text into its bits, eight per byte, most significant bit first.
pub fn text_to_bits(text: &str) -> Bits {
    Bits::from_slice(text.as_bytes())
}

/// Converts a byte-aligned payload back into text.
///
/// Each group of eight bits is read as a character code.
///
/// # Errors
///
/// Returns [`Error::Framing`] if the payload length is not a multiple of 8.
pub fn bits_to_text(bits: &BitStr) -> Result<String> {
    if bits.len() % 8 != 0 {
        return Err(Error::Framing { bits: bits.len() });
    }

    Ok(bits
        .chunks_exact(8)
        .map(|byte| char::from(byte.load_be::<u8>()))
        .collect())
}
