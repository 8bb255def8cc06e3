//! The register file layout.

use std::fmt;

use crate::error::DecodeError;

/// Number of slots in the register file, PC included.
pub const REGISTER_COUNT: usize = 7;

/// A machine register.
///
/// Six general-purpose registers plus the program counter. The PC is an
/// ordinary register as far as the instruction set is concerned: it can be
/// printed, set, or used as an arithmetic operand.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    /// Index of the next instruction to execute.
    Pc = 6,
}

/// All registers, in register-file order.
pub const ALL_REGISTERS: [Register; REGISTER_COUNT] = [
    Register::R0,
    Register::R1,
    Register::R2,
    Register::R3,
    Register::R4,
    Register::R5,
    Register::Pc,
];

impl Register {
    /// Slot of this register in the register file.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Register {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_REGISTERS
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::InvalidRegister(value))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::Pc => f.write_str("pc"),
            r => write!(f, "r{}", r.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_roundtrip_all_registers() {
        for &reg in &ALL_REGISTERS {
            assert_eq!(Register::try_from(reg as u8), Ok(reg));
        }
    }

    #[test]
    fn pc_is_last_slot() {
        assert_eq!(Register::Pc.index(), REGISTER_COUNT - 1);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Register::try_from(7), Err(DecodeError::InvalidRegister(7)));
        assert_eq!(
            Register::try_from(0xFF),
            Err(DecodeError::InvalidRegister(0xFF))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Register::R0.to_string(), "r0");
        assert_eq!(Register::R5.to_string(), "r5");
        assert_eq!(Register::Pc.to_string(), "pc");
    }
}
