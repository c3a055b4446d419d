//! Error types shared by the codec, checksum and receiver modules.
//!
//! Every failure is local and synchronous: it is returned at the point of
//! detection and never retried internally.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input is empty or contains symbols other than `0` and `1`
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// A parameter is outside its allowed domain (e.g. checksum block size)
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// Parity-bit planning could not satisfy the Hamming bound
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Payload cannot be split into whole bytes
    #[error("framing error: payload of {bits} bits is not a multiple of 8")]
    Framing { bits: usize },

    /// Any other malformed argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Error::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
