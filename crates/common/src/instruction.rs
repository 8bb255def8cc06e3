//! Instruction representation and encoding for the TLR instruction set.
//!
//! An instruction exists in two forms:
//!
//! - [`Instruction`], a tagged variant carrying only the operands its
//!   opcode uses. This is what the machine executes.
//! - [`RawInstruction`], the flat record with every operand field. This is
//!   what programs are stored as, and what the binary encoding holds.
//!
//! Each raw record is exactly 12 bytes, little-endian:
//! ```text
//! Byte 0:     opcode (u8)
//! Byte 1:     src register (u8)
//! Byte 2:     dest register (u8)
//! Byte 3:     reserved, always 0
//! Bytes 4-7:  addr (i32, little-endian)
//! Bytes 8-11: imm (i32, little-endian)
//! ```

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;
use crate::register::Register;

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = 12;

/// Offset of the reserved byte within an encoded record.
pub const RESERVED_BYTE: usize = 3;

/// A decoded instruction.
///
/// `src` and `dest` name registers; `addr` is a memory offset; `imm` and
/// `target` are scalars. Jump targets are raw instruction indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Nop,
    Set { dest: Register, imm: i32 },
    Add { src: Register, dest: Register },
    /// Computes `src - dest`, not `dest - src`.
    Sub { src: Register, dest: Register },
    Load { dest: Register, addr: i32 },
    Store { src: Register, addr: i32 },
    Jgt { src: Register, dest: Register, target: i32 },
    Jeq { src: Register, dest: Register, target: i32 },
    Ji { dest: Register },
    Print { src: Register },
}

impl Instruction {
    /// Unconditional jump to `target`.
    ///
    /// Encoded as `jeq r0, r0`, which is always taken.
    pub fn jump(target: i32) -> Self {
        Instruction::Jeq {
            src: Register::R0,
            dest: Register::R0,
            target,
        }
    }

    /// The opcode tag of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Nop => Opcode::Nop,
            Instruction::Set { .. } => Opcode::Set,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Jgt { .. } => Opcode::Jgt,
            Instruction::Jeq { .. } => Opcode::Jeq,
            Instruction::Ji { .. } => Opcode::Ji,
            Instruction::Print { .. } => Opcode::Print,
        }
    }

    /// Flatten into a raw record. Fields the opcode does not use are zero.
    pub fn encode(&self) -> RawInstruction {
        let mut raw = RawInstruction {
            opcode: self.opcode() as u8,
            ..RawInstruction::default()
        };
        match *self {
            Instruction::Nop => {}
            Instruction::Set { dest, imm } => {
                raw.dest = dest as u8;
                raw.imm = imm;
            }
            Instruction::Add { src, dest } | Instruction::Sub { src, dest } => {
                raw.src = src as u8;
                raw.dest = dest as u8;
            }
            Instruction::Load { dest, addr } => {
                raw.dest = dest as u8;
                raw.addr = addr;
            }
            Instruction::Store { src, addr } => {
                raw.src = src as u8;
                raw.addr = addr;
            }
            Instruction::Jgt { src, dest, target } | Instruction::Jeq { src, dest, target } => {
                raw.src = src as u8;
                raw.dest = dest as u8;
                raw.imm = target;
            }
            Instruction::Ji { dest } => raw.dest = dest as u8,
            Instruction::Print { src } => raw.src = src as u8,
        }
        raw
    }

    /// Decode a raw record.
    ///
    /// Only the fields the opcode uses are validated; unused fields are
    /// ignored.
    pub fn decode(raw: RawInstruction) -> Result<Self, DecodeError> {
        let src = || Register::try_from(raw.src);
        let dest = || Register::try_from(raw.dest);

        Ok(match Opcode::try_from(raw.opcode)? {
            Opcode::Nop => Instruction::Nop,
            Opcode::Set => Instruction::Set {
                dest: dest()?,
                imm: raw.imm,
            },
            Opcode::Add => Instruction::Add {
                src: src()?,
                dest: dest()?,
            },
            Opcode::Sub => Instruction::Sub {
                src: src()?,
                dest: dest()?,
            },
            Opcode::Load => Instruction::Load {
                dest: dest()?,
                addr: raw.addr,
            },
            Opcode::Store => Instruction::Store {
                src: src()?,
                addr: raw.addr,
            },
            Opcode::Jgt => Instruction::Jgt {
                src: src()?,
                dest: dest()?,
                target: raw.imm,
            },
            Opcode::Jeq => Instruction::Jeq {
                src: src()?,
                dest: dest()?,
                target: raw.imm,
            },
            Opcode::Ji => Instruction::Ji { dest: dest()? },
            Opcode::Print => Instruction::Print { src: src()? },
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match *self {
            Instruction::Nop => write!(f, "{op}"),
            Instruction::Set { dest, imm } => write!(f, "{op} {dest}, {imm}"),
            Instruction::Add { src, dest } | Instruction::Sub { src, dest } => {
                write!(f, "{op} {src}, {dest}")
            }
            Instruction::Load { dest, addr } => write!(f, "{op} {dest}, [{addr}]"),
            Instruction::Store { src, addr } => write!(f, "{op} {src}, [{addr}]"),
            Instruction::Jgt { src, dest, target } | Instruction::Jeq { src, dest, target } => {
                write!(f, "{op} {src}, {dest} -> {target}")
            }
            Instruction::Ji { dest } => write!(f, "{op} {dest}"),
            Instruction::Print { src } => write!(f, "{op} {src}"),
        }
    }
}

/// The flat instruction record: opcode tag plus every operand field.
///
/// This is the embedding surface for hosts that build programs from plain
/// data, and the unit of the binary encoding. It may hold opcodes or
/// registers that do not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawInstruction {
    pub opcode: u8,
    pub src: u8,
    pub dest: u8,
    pub addr: i32,
    pub imm: i32,
}

impl RawInstruction {
    /// Encode this record to 12 bytes (little-endian).
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0] = self.opcode;
        bytes[1] = self.src;
        bytes[2] = self.dest;
        bytes[4..8].copy_from_slice(&self.addr.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.imm.to_le_bytes());
        bytes
    }

    /// Read a record from 12 bytes. The reserved byte is not inspected.
    pub fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        Self {
            opcode: bytes[0],
            src: bytes[1],
            dest: bytes[2],
            addr: i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            imm: i32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }
}

impl From<Instruction> for RawInstruction {
    fn from(instr: Instruction) -> Self {
        instr.encode()
    }
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = DecodeError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        Instruction::decode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register::*;

    fn raw(opcode: u8, src: u8, dest: u8, addr: i32, imm: i32) -> RawInstruction {
        RawInstruction {
            opcode,
            src,
            dest,
            addr,
            imm,
        }
    }

    // --- Encode ---

    #[test]
    fn encode_set_uses_dest_and_imm() {
        let instr = Instruction::Set {
            dest: R0,
            imm: 37337,
        };
        assert_eq!(instr.encode(), raw(1, 0, 0, 0, 37337));
    }

    #[test]
    fn encode_store_uses_src_and_addr() {
        let instr = Instruction::Store { src: R3, addr: 1 };
        assert_eq!(instr.encode(), raw(5, 3, 0, 1, 0));
    }

    #[test]
    fn encode_jump_target_lives_in_imm() {
        let instr = Instruction::Jgt {
            src: R2,
            dest: R0,
            target: 10,
        };
        assert_eq!(instr.encode(), raw(6, 2, 0, 0, 10));
    }

    #[test]
    fn encode_nop_is_all_zero() {
        assert_eq!(Instruction::Nop.encode(), RawInstruction::default());
    }

    // --- Decode ---

    #[test]
    fn decode_zeroed_record_is_nop() {
        assert_eq!(
            Instruction::decode(RawInstruction::default()),
            Ok(Instruction::Nop)
        );
    }

    #[test]
    fn decode_ignores_unused_fields() {
        // PRINT only reads src; dest, addr and imm are garbage.
        let decoded = Instruction::decode(raw(9, 1, 200, -5, 77)).unwrap();
        assert_eq!(decoded, Instruction::Print { src: R1 });
    }

    #[test]
    fn decode_rejects_invalid_opcode() {
        assert_eq!(
            Instruction::decode(raw(10, 0, 0, 0, 0)),
            Err(DecodeError::InvalidOpcode(10))
        );
    }

    #[test]
    fn decode_rejects_invalid_used_register() {
        assert_eq!(
            Instruction::decode(raw(2, 0, 9, 0, 0)),
            Err(DecodeError::InvalidRegister(9))
        );
    }

    #[test]
    fn decode_pc_register() {
        assert_eq!(
            Instruction::decode(raw(9, 6, 0, 0, 0)),
            Ok(Instruction::Print { src: Pc })
        );
    }

    #[test]
    fn decode_inverts_encode_for_every_opcode() {
        let samples = [
            Instruction::Nop,
            Instruction::Set { dest: R4, imm: -1 },
            Instruction::Add { src: R1, dest: R0 },
            Instruction::Sub { src: R0, dest: R5 },
            Instruction::Load { dest: R1, addr: 7 },
            Instruction::Store { src: R2, addr: 3 },
            Instruction::Jgt {
                src: R2,
                dest: R0,
                target: 17,
            },
            Instruction::Jeq {
                src: R0,
                dest: R1,
                target: 4,
            },
            Instruction::Ji { dest: R3 },
            Instruction::Print { src: Pc },
        ];
        for instr in samples {
            assert_eq!(Instruction::decode(instr.encode()), Ok(instr), "{instr:?}");
        }
    }

    // --- Bytes ---

    #[test]
    fn little_endian_layout() {
        let bytes = raw(6, 2, 1, 0x0403_0201, -2).to_bytes();
        assert_eq!(bytes[0], 6);
        assert_eq!(bytes[1], 2);
        assert_eq!(bytes[2], 1);
        assert_eq!(bytes[RESERVED_BYTE], 0);
        assert_eq!(&bytes[4..8], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[8..12], &[0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn bytes_roundtrip() {
        let record = raw(5, 3, 0, 1, i32::MIN);
        assert_eq!(RawInstruction::from_bytes(record.to_bytes()), record);
    }

    // --- Helpers ---

    #[test]
    fn jump_is_always_taken_jeq() {
        assert_eq!(
            Instruction::jump(3),
            Instruction::Jeq {
                src: R0,
                dest: R0,
                target: 3
            }
        );
    }

    #[test]
    fn display_listing_forms() {
        assert_eq!(
            Instruction::Set {
                dest: R0,
                imm: 37337,
            }
            .to_string(),
            "set r0, 37337"
        );
        assert_eq!(Instruction::Load { dest: R1, addr: 0 }.to_string(), "load r1, [0]");
        assert_eq!(
            Instruction::Jgt {
                src: R2,
                dest: R0,
                target: 10
            }
            .to_string(),
            "jgt r2, r0 -> 10"
        );
        assert_eq!(Instruction::Print { src: Pc }.to_string(), "print pc");
        assert_eq!(Instruction::Nop.to_string(), "nop");
    }
}
