//! Running statistics over decoded messages.
//!
//! [`DecodeStatistics`] is owned by the caller and fed one result at a time;
//! the codec itself keeps no state between calls. The accumulated error
//! positions and per-status counts are what a reporting front end needs to
//! chart correction rates and where errors land in the codeword.
//!
//! # Thread Safety
//!
//! Updates take `&mut self`. Share across threads behind a `Mutex`, or keep
//! per-thread statistics and [`merge`](DecodeStatistics::merge) them at the end.

use crate::cs::ecc::hamming::Decoded;
use crate::cs::ecc::receiver::{Reception, ReceptionStatus};
use std::collections::BTreeMap;
use std::fmt;

/// Accumulated outcome counts and error positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStatistics {
    /// Messages recorded, excluding rejected input
    pub messages: u64,
    /// Messages that passed every parity check
    pub clean: u64,
    /// Messages with one corrected bit
    pub corrected: u64,
    /// Messages whose syndrome pointed outside the codeword
    pub uncorrectable: u64,
    /// Messages whose payload checksum disagreed with the sender
    pub checksum_failures: u64,
    /// Inputs rejected before decoding (not binary, empty)
    pub rejected: u64,
    error_positions: Vec<usize>,
}

impl DecodeStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a full reception report.
    pub fn record(&mut self, reception: &Reception) {
        self.messages += 1;
        match reception.status() {
            ReceptionStatus::Clean => self.clean += 1,
            ReceptionStatus::Corrected => self.corrected += 1,
            ReceptionStatus::Uncorrectable => self.uncorrectable += 1,
            ReceptionStatus::ChecksumMismatch => self.checksum_failures += 1,
        }
        if reception.error_position() != 0 && !reception.is_uncorrectable() {
            self.error_positions.push(reception.error_position());
        }
    }

    /// Record a bare decode result, without checksum information.
    pub fn record_decoded(&mut self, decoded: &Decoded) {
        self.messages += 1;
        if decoded.is_uncorrectable() {
            self.uncorrectable += 1;
        } else if decoded.is_corrected() {
            self.corrected += 1;
        } else {
            self.clean += 1;
        }
        if decoded.is_corrected() {
            self.error_positions.push(decoded.error_position);
        }
    }

    /// Record an input that failed validation.
    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    /// Corrected bit positions in the order they were recorded.
    ///
    /// Uncorrectable syndromes are counted but not listed, so every entry is a
    /// real position inside its codeword.
    pub fn error_positions(&self) -> &[usize] {
        &self.error_positions
    }

    /// How many times each error position was reported.
    pub fn position_histogram(&self) -> BTreeMap<usize, u64> {
        let mut histogram = BTreeMap::new();
        for &pos in &self.error_positions {
            *histogram.entry(pos).or_insert(0) += 1;
        }
        histogram
    }

    /// Message count per status.
    pub fn status_counts(&self) -> BTreeMap<ReceptionStatus, u64> {
        [
            (ReceptionStatus::Clean, self.clean),
            (ReceptionStatus::Corrected, self.corrected),
            (ReceptionStatus::Uncorrectable, self.uncorrectable),
            (ReceptionStatus::ChecksumMismatch, self.checksum_failures),
        ]
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .collect()
    }

    /// Fraction of recorded messages that needed a correction.
    ///
    /// Returns 0.0 if nothing has been recorded.
    pub fn correction_rate(&self) -> f64 {
        if self.messages == 0 {
            0.0
        } else {
            self.corrected as f64 / self.messages as f64
        }
    }

    /// Fraction of recorded messages that arrived clean or were corrected.
    pub fn recovery_rate(&self) -> f64 {
        if self.messages == 0 {
            0.0
        } else {
            (self.clean + self.corrected) as f64 / self.messages as f64
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &DecodeStatistics) {
        self.messages += other.messages;
        self.clean += other.clean;
        self.corrected += other.corrected;
        self.uncorrectable += other.uncorrectable;
        self.checksum_failures += other.checksum_failures;
        self.rejected += other.rejected;
        self.error_positions.extend_from_slice(&other.error_positions);
    }
}

impl fmt::Display for DecodeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} messages: {} clean, {} corrected, {} uncorrectable, {} checksum failures, {} rejected ({:.1}% recovered)",
            self.messages,
            self.clean,
            self.corrected,
            self.uncorrectable,
            self.checksum_failures,
            self.rejected,
            self.recovery_rate() * 100.0
        )
    }
}
