//! Verification errors for the TLR verifier.
//!
//! Every error except `ProgramTooLarge` carries the instruction index
//! (`at`). The verifier collects ALL errors, not just the first.

use thiserror::Error;

/// Errors found during static verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    // --- Limits ---
    /// The PC register cannot index this many instructions.
    #[error("program too large: {size} instructions (max {max})")]
    ProgramTooLarge { size: usize, max: usize },

    // --- Structural ---
    /// Opcode byte outside the instruction set.
    #[error("invalid opcode {opcode} at instruction {at}")]
    InvalidOpcode { at: usize, opcode: u8 },

    /// A register field the opcode uses does not name a register.
    #[error("invalid register {register} at instruction {at}")]
    InvalidRegister { at: usize, register: u8 },

    /// A field the opcode does not use is nonzero.
    #[error("non-zero unused field at instruction {at}")]
    NonZeroUnusedField { at: usize },

    // --- Bounds ---
    /// JGT/JEQ target outside the program.
    #[error("jump target {target} out of range (program size {size}) at instruction {at}")]
    JumpOutOfRange { at: usize, target: i32, size: usize },

    /// LOAD/STORE offset outside memory.
    #[error("memory offset {addr} out of range (memory size {size}) at instruction {at}")]
    MemoryOutOfRange { at: usize, addr: i32, size: usize },

    /// SET PC lands outside `[0, program size]` after the increment.
    #[error("write to pc lands at {pc}, outside the program (size {size}) at instruction {at}")]
    PcOutOfRange { at: usize, pc: i64, size: usize },

    // --- Exit ---
    /// The final instruction always transfers control, so the program can
    /// never fall through to its end.
    #[error("final instruction {at} never falls through to program end")]
    NoFallthroughExit { at: usize },
}
