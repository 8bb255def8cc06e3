//! Runtime faults for the TLR machine.
//!
//! A fault halts the run loop but is not a crash: the context stays
//! inspectable. Every variant carries the index of the faulting instruction
//! (`at`), which is also the PC the context is left at.

use std::io;

use thiserror::Error;

/// Errors raised by a single step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// LOAD or STORE offset outside `[0, memory size)`.
    #[error("out-of-range memory access: offset {addr} (memory size {size}) at pc {at}")]
    MemoryOutOfRange { at: usize, addr: i32, size: usize },

    /// Jump target outside `[0, program size)`.
    #[error("out-of-range jump: target {target} (program size {size}) at pc {at}")]
    JumpOutOfRange { at: usize, target: i32, size: usize },

    /// The record's opcode byte is not part of the instruction set.
    #[error("invalid opcode {opcode} at pc {at}")]
    InvalidOpcode { at: usize, opcode: u8 },

    /// The record names a register that does not exist.
    #[error("invalid register {register} at pc {at}")]
    InvalidRegister { at: usize, register: u8 },

    /// The PC would leave `[0, program size]`, or was fetched outside the
    /// program.
    #[error("program counter out of range: {pc} at pc {at}")]
    PcOutOfRange { at: usize, pc: i64 },

    /// PRINT could not write to its output.
    #[error("output error ({kind}) at pc {at}")]
    Output { at: usize, kind: io::ErrorKind },
}

/// The memory block for a new context could not be allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot allocate {size} words of memory")]
pub struct AllocError {
    pub size: usize,
}

/// Broad category of a [`Fault`], without location details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Memory,
    Jump,
    Opcode,
    Register,
    Pc,
    Output,
}

impl Fault {
    /// Index of the instruction that faulted.
    pub fn at(&self) -> usize {
        match *self {
            Fault::MemoryOutOfRange { at, .. }
            | Fault::JumpOutOfRange { at, .. }
            | Fault::InvalidOpcode { at, .. }
            | Fault::InvalidRegister { at, .. }
            | Fault::PcOutOfRange { at, .. }
            | Fault::Output { at, .. } => at,
        }
    }

    /// The category of this fault.
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::MemoryOutOfRange { .. } => FaultKind::Memory,
            Fault::JumpOutOfRange { .. } => FaultKind::Jump,
            Fault::InvalidOpcode { .. } => FaultKind::Opcode,
            Fault::InvalidRegister { .. } => FaultKind::Register,
            Fault::PcOutOfRange { .. } => FaultKind::Pc,
            Fault::Output { .. } => FaultKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_formats() {
        assert_eq!(
            Fault::MemoryOutOfRange {
                at: 6,
                addr: 2,
                size: 2
            }
            .to_string(),
            "out-of-range memory access: offset 2 (memory size 2) at pc 6"
        );
        assert_eq!(
            Fault::JumpOutOfRange {
                at: 3,
                target: 9,
                size: 4
            }
            .to_string(),
            "out-of-range jump: target 9 (program size 4) at pc 3"
        );
        assert_eq!(
            Fault::InvalidOpcode { at: 1, opcode: 42 }.to_string(),
            "invalid opcode 42 at pc 1"
        );
    }

    #[test]
    fn alloc_error_display() {
        assert_eq!(
            AllocError { size: 1 << 62 }.to_string(),
            "cannot allocate 4611686018427387904 words of memory"
        );
    }

    #[test]
    fn at_and_kind() {
        let fault = Fault::PcOutOfRange { at: 4, pc: -1 };
        assert_eq!(fault.at(), 4);
        assert_eq!(fault.kind(), FaultKind::Pc);

        let fault = Fault::Output {
            at: 0,
            kind: io::ErrorKind::BrokenPipe,
        };
        assert_eq!(fault.at(), 0);
        assert_eq!(fault.kind(), FaultKind::Output);
    }
}
