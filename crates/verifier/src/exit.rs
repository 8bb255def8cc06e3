//! Exit analysis for TLR programs.
//!
//! A run completes only when the PC reaches the program length, which
//! requires the final instruction to fall through. A final `set pc` lands
//! wherever its immediate says, so it exits only if that is the end.

use crate::error::VerifyError;
use crate::structural::ProgramContext;
use tlr_common::{Instruction, Register};

/// Run the exit check.
pub fn check_exit(ctx: &ProgramContext) -> Vec<VerifyError> {
    let mut errors = Vec::new();
    let Some(at) = ctx.len().checked_sub(1) else {
        return errors;
    };

    match ctx.instructions[at] {
        Some(Instruction::Ji { .. }) => errors.push(VerifyError::NoFallthroughExit { at }),
        Some(Instruction::Jeq { src, dest, .. }) if src == dest => {
            errors.push(VerifyError::NoFallthroughExit { at });
        }
        Some(Instruction::Set {
            dest: Register::Pc,
            imm,
        }) if i64::from(imm) + 1 != ctx.len() as i64 => {
            errors.push(VerifyError::NoFallthroughExit { at });
        }
        _ => {}
    }

    errors
}
