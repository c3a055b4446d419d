//! Verification of received codewords.
//!
//! The Hamming syndrome and the Fletcher checksum are independent corruption
//! signals. The convention used here compares checksums of the *same*
//! representation on both ends of the link:
//!
//! - the sender checksums the original payload before encoding ([`Transmission`]),
//! - the receiver checksums the corrected payload after decoding ([`Receiver`]).
//!
//! Equal values give high confidence the decode restored the sender's payload.
//! The checksum of the raw codeword is reported as a diagnostic only, since it
//! covers a different number of bits than the payload.
//!
//! The receiver never rejects a message on its own. It returns a [`Reception`]
//! stamped with the configured [`AcceptancePolicy`], and the caller decides
//! with [`Reception::is_accepted`].

use crate::cs::ecc::bits::{bits_to_text, parse_bits};
use crate::cs::ecc::fletcher::{BlockSize, Fletcher};
use crate::cs::ecc::hamming::HammingCodec;
use crate::cs::ecc::{BitStr, Bits, ChecksumAlgorithm, Result};
use log::{debug, warn};
use std::fmt;

/// Whether a corrected message may be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptancePolicy {
    /// Accept clean and single-bit-corrected messages whose checksum does not disagree
    #[default]
    AcceptCorrected,
    /// Accept only messages that needed no correction
    RequirePristine,
}

/// Receiver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiverConfig {
    block_size: BlockSize,
    policy: AcceptancePolicy,
}

impl ReceiverConfig {
    /// Create a builder starting from the defaults (16-bit blocks, accept corrected).
    pub fn builder() -> ReceiverConfigBuilder {
        ReceiverConfigBuilder::default()
    }

    /// Checksum block size used on both ends of the link
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Acceptance policy stamped on every [`Reception`] this configuration produces
    pub fn policy(&self) -> AcceptancePolicy {
        self.policy
    }
}

/// A builder for [`ReceiverConfig`].
#[derive(Debug, Clone, Default)]
pub struct ReceiverConfigBuilder {
    block_size: BlockSize,
    policy: AcceptancePolicy,
}

impl ReceiverConfigBuilder {
    /// Sets the checksum block size.
    pub fn block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets the checksum block size from a bit width.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidParameter`] unless `bits` is 8, 16 or 32.
    pub fn block_bits(mut self, bits: usize) -> Result<Self> {
        self.block_size = BlockSize::try_from(bits)?;
        Ok(self)
    }

    /// Sets the acceptance policy.
    pub fn policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ReceiverConfig {
        ReceiverConfig {
            block_size: self.block_size,
            policy: self.policy,
        }
    }
}

/// Sender side of the link: the codeword to transmit and the payload checksum
/// to send alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    codeword: Bits,
    checksum: u16,
}

impl Transmission {
    /// Prepare a payload with the default 16-bit checksum blocks.
    pub fn new(payload: &BitStr) -> Result<Self> {
        Self::with_config(payload, &ReceiverConfig::default())
    }

    /// Prepare a payload using the block size of `config`.
    pub fn with_config(payload: &BitStr, config: &ReceiverConfig) -> Result<Self> {
        let checksum = Fletcher::new(config.block_size()).calculate(payload);
        let codeword = HammingCodec::new().encode(payload)?;
        Ok(Self { codeword, checksum })
    }

    /// Encoded bits to put on the wire
    pub fn codeword(&self) -> &BitStr {
        &self.codeword
    }

    /// Checksum of the original payload
    pub fn checksum(&self) -> u16 {
        self.checksum
    }
}

/// Outcome of receiving one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReceptionStatus {
    /// All parity checks passed and the checksum did not disagree
    Clean,
    /// One bit was corrected and the checksum did not disagree
    Corrected,
    /// The syndrome pointed outside the codeword; nothing was corrected
    Uncorrectable,
    /// The payload checksum differs from the sender's
    ChecksumMismatch,
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReceptionStatus::Clean => "clean",
            ReceptionStatus::Corrected => "corrected",
            ReceptionStatus::Uncorrectable => "uncorrectable",
            ReceptionStatus::ChecksumMismatch => "checksum mismatch",
        };
        f.write_str(label)
    }
}

/// Structured report for one received codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    payload: Bits,
    error_position: usize,
    uncorrectable: bool,
    checksum_before: u16,
    checksum_after: u16,
    expected_checksum: Option<u16>,
    policy: AcceptancePolicy,
}

impl Reception {
    /// Payload after correction
    pub fn payload(&self) -> &BitStr {
        &self.payload
    }

    /// 1-based position of the corrected bit, 0 if none.
    ///
    /// Exceeds the payload's codeword length when the reception is
    /// [uncorrectable](Self::is_uncorrectable); do not use it as an index then.
    pub fn error_position(&self) -> usize {
        self.error_position
    }

    /// Whether the syndrome pointed past the end of the codeword
    pub fn is_uncorrectable(&self) -> bool {
        self.uncorrectable
    }

    /// Acceptance policy of the receiver that produced this report
    pub fn policy(&self) -> AcceptancePolicy {
        self.policy
    }

    /// Checksum of the raw codeword as received
    pub fn checksum_before(&self) -> u16 {
        self.checksum_before
    }

    /// Checksum of the corrected payload
    pub fn checksum_after(&self) -> u16 {
        self.checksum_after
    }

    /// Checksum the sender reported, if any
    pub fn expected_checksum(&self) -> Option<u16> {
        self.expected_checksum
    }

    /// Whether the corrected payload matches the sender's checksum.
    ///
    /// `None` when the sender's checksum was not supplied.
    pub fn checksum_matches(&self) -> Option<bool> {
        self.expected_checksum
            .map(|expected| expected == self.checksum_after)
    }

    /// Classify the reception. A checksum disagreement outranks the syndrome.
    pub fn status(&self) -> ReceptionStatus {
        if self.checksum_matches() == Some(false) {
            ReceptionStatus::ChecksumMismatch
        } else if self.uncorrectable {
            ReceptionStatus::Uncorrectable
        } else if self.error_position != 0 {
            ReceptionStatus::Corrected
        } else {
            ReceptionStatus::Clean
        }
    }

    /// Whether the receiver's configured policy accepts this reception.
    pub fn is_accepted(&self) -> bool {
        self.is_accepted_under(&self.policy)
    }

    /// Apply a different acceptance policy to this reception.
    pub fn is_accepted_under(&self, policy: &AcceptancePolicy) -> bool {
        match (policy, self.status()) {
            (_, ReceptionStatus::Clean) => true,
            (AcceptancePolicy::AcceptCorrected, ReceptionStatus::Corrected) => true,
            _ => false,
        }
    }

    /// Payload as text, eight bits per character.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Framing`] if the payload is not byte-aligned.
    pub fn text(&self) -> Result<String> {
        bits_to_text(&self.payload)
    }
}

/// Decodes and verifies received codewords.
#[derive(Debug, Clone, Copy, Default)]
pub struct Receiver {
    config: ReceiverConfig,
    codec: HammingCodec,
}

impl Receiver {
    /// Create a receiver with the given configuration
    pub fn new(config: ReceiverConfig) -> Self {
        Self {
            config,
            codec: HammingCodec::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Validate, decode and checksum a received bit string.
    ///
    /// # Arguments
    ///
    /// * `raw` - Received codeword as `0`/`1` characters
    /// * `expected_checksum` - Payload checksum reported by the sender, if any
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if `raw` is empty or not binary;
    /// the codec is not invoked in that case.
    pub fn receive(&self, raw: &str, expected_checksum: Option<u16>) -> Result<Reception> {
        let codeword = parse_bits(raw)?;
        self.receive_bits(&codeword, expected_checksum)
    }

    /// Decode and checksum an already-validated codeword.
    pub fn receive_bits(
        &self,
        codeword: &BitStr,
        expected_checksum: Option<u16>,
    ) -> Result<Reception> {
        let checksum = Fletcher::new(self.config.block_size());
        let checksum_before = checksum.calculate(codeword);

        let decoded = self.codec.decode(codeword)?;
        let checksum_after = checksum.calculate(&decoded.payload);

        let reception = Reception {
            uncorrectable: decoded.is_uncorrectable(),
            error_position: decoded.error_position,
            payload: decoded.payload,
            checksum_before,
            checksum_after,
            expected_checksum,
            policy: self.config.policy(),
        };

        if reception.checksum_matches() == Some(false) {
            warn!(
                "checksum mismatch: sender {:#06x}, decoded payload {:#06x}",
                expected_checksum.unwrap_or_default(),
                checksum_after
            );
        }
        debug!(
            "received {} bits: {} (error position {})",
            codeword.len(),
            reception.status(),
            reception.error_position
        );

        Ok(reception)
    }
}
