//! Error correction and integrity checking for binary transmissions.
//!
//! This module provides:
//! - Hamming single-error-correcting codes with parity bits at power-of-two positions
//! - Fletcher checksums over zero-padded 8/16/32-bit blocks
//! - A receiver that combines both into a per-message verification report
//! - A caller-owned statistics accumulator for decode outcomes
//! - A seeded noisy channel for exercising the codec
//!
//! # Examples
//!
//! ```rust
//! use hamcheck::ecc::{bits, HammingCodec, Transmission, Receiver};
//!
//! let payload = bits::parse_bits("1011").unwrap();
//! let codeword = HammingCodec::new().encode(&payload).unwrap();
//! assert_eq!(bits::to_bit_string(&codeword), "0110011");
//!
//! let sent = Transmission::new(&payload).unwrap();
//! let reception = Receiver::default()
//!     .receive("0110111", Some(sent.checksum()))
//!     .unwrap();
//! assert_eq!(reception.error_position(), 5);
//! assert_eq!(bits::to_bit_string(reception.payload()), "1011");
//! ```

use bitvec::prelude::*;

pub use crate::error::Result;

/// Owned bit sequence, most significant bit first
pub type Bits = BitVec<u8, Msb0>;

/// Borrowed bit sequence
pub type BitStr = BitSlice<u8, Msb0>;

/// Trait for checksum algorithm implementations over bit sequences
pub trait ChecksumAlgorithm {
    /// Calculate the checksum for the given bits
    fn calculate(&self, data: &BitStr) -> u16;

    /// Get name of the checksum algorithm
    fn name(&self) -> &str;

    /// Verify that data has the expected checksum
    fn verify(&self, data: &BitStr, expected: u16) -> bool {
        self.calculate(data) == expected
    }
}

pub mod bits;
pub mod channel;
pub mod fletcher;
pub mod hamming;
pub mod parity;
pub mod receiver;
pub mod statistics;

pub use channel::{Corrupted, NoisyChannel};
pub use fletcher::{fletcher_checksum, BlockSize, Fletcher};
pub use hamming::{hamming_decode, hamming_encode, Decoded, HammingCodec};
pub use parity::{calculate_parity_bits, is_parity_position, parity_bits_for_codeword};
pub use receiver::{
    AcceptancePolicy, Reception, ReceptionStatus, Receiver, ReceiverConfig,
    ReceiverConfigBuilder, Transmission,
};
pub use statistics::DecodeStatistics;
