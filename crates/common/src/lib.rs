//! TLR common types and instruction encoding.
//!
//! This crate provides the foundational data structures for the Tiny
//! Language Runtime instruction set:
//!
//! - [`Register`]: the six general-purpose registers and the PC
//! - [`Opcode`]: the ten opcodes
//! - [`Instruction`]: decoded instructions, one variant per opcode
//! - [`RawInstruction`]: the flat record form and its 12-byte encoding
//! - [`Program`]: an immutable sequence of instructions
//! - [`DecodeError`]: errors from decoding records and byte streams

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{Instruction, RawInstruction};
pub use opcode::Opcode;
pub use program::Program;
pub use register::Register;
