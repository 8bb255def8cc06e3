//! Structural validation pass for TLR programs.
//!
//! Decodes every record, flags unused fields that are not zero, and builds
//! the ProgramContext used by later passes.

use crate::error::VerifyError;
use tlr_common::{DecodeError, Instruction, RawInstruction};

/// Context built from the structural pass, consumed by later passes.
#[derive(Debug, Clone)]
pub struct ProgramContext {
    /// Decoded instructions; `None` where the record does not decode.
    pub instructions: Vec<Option<Instruction>>,
    /// Memory size the program will run with.
    pub memory_size: usize,
}

impl ProgramContext {
    /// Decoded instructions with their indices, skipping undecodable slots.
    pub fn decoded(&self) -> impl Iterator<Item = (usize, Instruction)> + '_ {
        self.instructions
            .iter()
            .enumerate()
            .filter_map(|(at, instr)| instr.as_ref().map(|&i| (at, i)))
    }

    /// Program length in instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Run the structural validation pass.
///
/// Returns the ProgramContext and any errors found.
pub fn check_structural(
    raws: &[RawInstruction],
    memory_size: usize,
) -> (ProgramContext, Vec<VerifyError>) {
    let mut errors = Vec::new();
    let mut instructions = Vec::with_capacity(raws.len());

    for (at, &raw) in raws.iter().enumerate() {
        match Instruction::decode(raw) {
            Ok(instr) => {
                // Encoding zeroes every unused field, so any difference is
                // a stray value in a field the opcode ignores.
                if instr.encode() != raw {
                    errors.push(VerifyError::NonZeroUnusedField { at });
                }
                instructions.push(Some(instr));
            }
            Err(DecodeError::InvalidRegister(register)) => {
                errors.push(VerifyError::InvalidRegister { at, register });
                instructions.push(None);
            }
            Err(_) => {
                errors.push(VerifyError::InvalidOpcode {
                    at,
                    opcode: raw.opcode,
                });
                instructions.push(None);
            }
        }
    }

    let ctx = ProgramContext {
        instructions,
        memory_size,
    };
    (ctx, errors)
}
