//! Opcode definitions for the TLR instruction set.

use std::fmt;

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The `#[repr(u8)]` values are the opcode bytes of the binary encoding.
/// NOP is 0 so that a zeroed record decodes as a no-op.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// No operation.
    Nop = 0,
    /// `dest = imm`.
    Set = 1,
    /// `dest = src + dest`.
    Add = 2,
    /// `dest = src - dest`.
    Sub = 3,
    /// Load `memory[addr]` into `dest`.
    Load = 4,
    /// Store `src` into `memory[addr]`.
    Store = 5,
    /// If `src > dest`, jump to `target`.
    Jgt = 6,
    /// If `src == dest`, jump to `target`.
    Jeq = 7,
    /// Jump to the instruction index held in `dest`.
    Ji = 8,
    /// Print `src` as a decimal line.
    Print = 9,
}

/// All valid opcodes, in byte order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Nop,
    Opcode::Set,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Load,
    Opcode::Store,
    Opcode::Jgt,
    Opcode::Jeq,
    Opcode::Ji,
    Opcode::Print,
];

impl Opcode {
    /// Lower-case mnemonic used in listings.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Set => "set",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::Jgt => "jgt",
            Opcode::Jeq => "jeq",
            Opcode::Ji => "ji",
            Opcode::Print => "print",
        }
    }

    /// True for the three opcodes that may redirect the PC.
    pub fn is_jump(self) -> bool {
        matches!(self, Opcode::Jgt | Opcode::Jeq | Opcode::Ji)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::InvalidOpcode(value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
