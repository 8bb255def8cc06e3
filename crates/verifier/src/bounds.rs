//! Static bounds pass for TLR programs.
//!
//! Reports jump targets, memory offsets, and immediate PC writes that are
//! guaranteed to fault when executed. Register-held targets (`ji`) and
//! data-dependent PC writes are only known at runtime.

use crate::error::VerifyError;
use crate::structural::ProgramContext;
use tlr_common::{Instruction, Register};

/// Run the bounds check.
pub fn check_bounds(ctx: &ProgramContext) -> Vec<VerifyError> {
    let mut errors = Vec::new();
    let size = ctx.len();

    for (at, instr) in ctx.decoded() {
        match instr {
            Instruction::Jgt { target, .. } | Instruction::Jeq { target, .. }
                if !in_range(target, size) =>
            {
                errors.push(VerifyError::JumpOutOfRange { at, target, size });
            }
            Instruction::Load { addr, .. } | Instruction::Store { addr, .. }
                if !in_range(addr, ctx.memory_size) =>
            {
                errors.push(VerifyError::MemoryOutOfRange {
                    at,
                    addr,
                    size: ctx.memory_size,
                });
            }
            Instruction::Set {
                dest: Register::Pc,
                imm,
            } => {
                let pc = i64::from(imm) + 1;
                if pc < 0 || pc > size as i64 {
                    errors.push(VerifyError::PcOutOfRange { at, pc, size });
                }
            }
            _ => {}
        }
    }

    errors
}

fn in_range(value: i32, len: usize) -> bool {
    usize::try_from(value).is_ok_and(|v| v < len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::check_structural;
    use tlr_common::Register::*;

    fn check(instrs: &[Instruction], memory_size: usize) -> Vec<VerifyError> {
        let raws: Vec<_> = instrs.iter().map(Instruction::encode).collect();
        let (ctx, _) = check_structural(&raws, memory_size);
        check_bounds(&ctx)
    }

    #[test]
    fn in_range_program_passes() {
        let errors = check(
            &[
                Instruction::Load { dest: R0, addr: 1 },
                Instruction::Jgt {
                    src: R2,
                    dest: R0,
                    target: 0,
                },
            ],
            2,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn jump_past_end() {
        let errors = check(&[Instruction::jump(1)], 0);
        assert_eq!(
            errors,
            vec![VerifyError::JumpOutOfRange {
                at: 0,
                target: 1,
                size: 1
            }]
        );
    }

    #[test]
    fn negative_jump() {
        let errors = check(
            &[Instruction::Jgt {
                src: R0,
                dest: R1,
                target: -1,
            }],
            0,
        );
        assert!(matches!(
            errors[..],
            [VerifyError::JumpOutOfRange { target: -1, .. }]
        ));
    }

    #[test]
    fn memory_offset_at_size() {
        let errors = check(&[Instruction::Store { src: R0, addr: 2 }], 2);
        assert_eq!(
            errors,
            vec![VerifyError::MemoryOutOfRange {
                at: 0,
                addr: 2,
                size: 2
            }]
        );
    }

    #[test]
    fn any_access_without_memory() {
        let errors = check(&[Instruction::Load { dest: R0, addr: 0 }], 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn set_pc_must_land_in_program() {
        let ok = check(&[Instruction::Set { dest: Pc, imm: 0 }], 0);
        assert!(ok.is_empty());

        let errors = check(&[Instruction::Set { dest: Pc, imm: 1 }], 0);
        assert_eq!(
            errors,
            vec![VerifyError::PcOutOfRange {
                at: 0,
                pc: 2,
                size: 1
            }]
        );
    }

    #[test]
    fn register_targets_are_not_checked() {
        let errors = check(
            &[
                Instruction::Set { dest: R0, imm: 99 },
                Instruction::Ji { dest: R0 },
            ],
            0,
        );
        assert!(errors.is_empty());
    }
}
