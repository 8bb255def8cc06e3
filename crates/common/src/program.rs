//! Program representation for TLR instruction streams.
//!
//! A program is a fixed sequence of raw instruction records. Binary files
//! (.tlrb) are raw concatenations of 12-byte records with no header.
//! Records are decoded one at a time as they are fetched, so a program may
//! hold slots that never decode; those only fault if execution reaches them.

use crate::error::DecodeError;
use crate::instruction::{Instruction, RawInstruction, RECORD_SIZE, RESERVED_BYTE};

/// A TLR program: an immutable sequence of instruction records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<RawInstruction>,
}

impl Program {
    /// Create a program from decoded instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions: instructions.iter().map(Instruction::encode).collect(),
        }
    }

    /// Create a program from raw records, without validating them.
    pub fn from_raw(instructions: Vec<RawInstruction>) -> Self {
        Self { instructions }
    }

    /// Encode the entire program to bytes.
    ///
    /// The result length is always `len() * 12`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.instructions.len() * RECORD_SIZE);
        for raw in &self.instructions {
            bytes.extend_from_slice(&raw.to_bytes());
        }
        bytes
    }

    /// Decode a byte slice into a program.
    ///
    /// The slice length must be a multiple of 12 and every reserved byte must
    /// be zero. Opcodes and registers are not checked here.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(DecodeError::InvalidLength(bytes.len()));
        }

        let mut instructions = Vec::with_capacity(bytes.len() / RECORD_SIZE);
        for (at, chunk) in bytes.chunks_exact(RECORD_SIZE).enumerate() {
            if chunk[RESERVED_BYTE] != 0 {
                return Err(DecodeError::ReservedByte { at });
            }
            let mut record = [0u8; RECORD_SIZE];
            record.copy_from_slice(chunk);
            instructions.push(RawInstruction::from_bytes(record));
        }

        Ok(Self { instructions })
    }

    /// Fetch and decode the instruction at `index`.
    ///
    /// Returns `None` when `index` is past the end of the program.
    pub fn fetch(&self, index: usize) -> Option<Result<Instruction, DecodeError>> {
        self.instructions.get(index).map(|&raw| Instruction::decode(raw))
    }

    /// The raw record at `index`.
    pub fn raw(&self, index: usize) -> Option<&RawInstruction> {
        self.instructions.get(index)
    }

    /// All raw records, in order.
    pub fn raw_instructions(&self) -> &[RawInstruction] {
        &self.instructions
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().map(|i| i.encode()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register;

    #[test]
    fn empty_program() {
        let program = Program::new(vec![]);
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert_eq!(program.encode(), Vec::<u8>::new());
        assert_eq!(program.fetch(0), None);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let program = Program::new(vec![
            Instruction::Set {
                dest: Register::R0,
                imm: 37337,
            },
            Instruction::Print { src: Register::R0 },
        ]);
        let bytes = program.encode();

        assert_eq!(bytes.len(), 24); // 2 records * 12 bytes
        assert_eq!(Program::decode(&bytes), Ok(program));
    }

    #[test]
    fn decode_invalid_length() {
        assert_eq!(
            Program::decode(&[0; 13]),
            Err(DecodeError::InvalidLength(13))
        );
        assert_eq!(Program::decode(&[0; 8]), Err(DecodeError::InvalidLength(8)));
    }

    #[test]
    fn decode_empty_bytes() {
        let program = Program::decode(&[]).unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn decode_rejects_reserved_byte() {
        let mut bytes = vec![0u8; 24];
        bytes[RECORD_SIZE + RESERVED_BYTE] = 1;
        assert_eq!(
            Program::decode(&bytes),
            Err(DecodeError::ReservedByte { at: 1 })
        );
    }

    #[test]
    fn decode_defers_opcode_check_to_fetch() {
        // Second record carries opcode 0xEE.
        let mut bytes = vec![0u8; 24];
        bytes[RECORD_SIZE] = 0xEE;
        let program = Program::decode(&bytes).unwrap();

        assert_eq!(program.len(), 2);
        assert_eq!(program.fetch(0), Some(Ok(Instruction::Nop)));
        assert_eq!(program.fetch(1), Some(Err(DecodeError::InvalidOpcode(0xEE))));
    }

    #[test]
    fn from_raw_keeps_records_verbatim() {
        let record = RawInstruction {
            opcode: 42,
            src: 1,
            dest: 2,
            addr: 3,
            imm: 4,
        };
        let program = Program::from_raw(vec![record]);
        assert_eq!(program.raw(0), Some(&record));
        assert_eq!(program.raw_instructions(), &[record]);
    }

    #[test]
    fn collect_from_instructions() {
        let program: Program = (0..3).map(|_| Instruction::Nop).collect();
        assert_eq!(program.len(), 3);
        assert!(!program.is_empty());
    }
}
