//! Decode errors for TLR instruction streams.

use thiserror::Error;

/// Errors that occur while turning raw records or bytes into instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode byte outside the instruction set.
    #[error("invalid opcode: {0}")]
    InvalidOpcode(u8),

    /// Register byte outside `r0..r5, pc`.
    #[error("invalid register: {0}")]
    InvalidRegister(u8),

    /// Byte stream length is not a multiple of 12.
    #[error("invalid byte stream length: {0} (must be multiple of 12)")]
    InvalidLength(usize),

    /// The reserved byte of a record is not zero.
    #[error("non-zero reserved byte in record {at}")]
    ReservedByte { at: usize },
}
