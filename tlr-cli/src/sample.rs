//! The built-in demonstration program.

use tlr_common::{Instruction, Program, Register::*};

/// Memory the sample program expects.
pub const SAMPLE_MEMORY_SIZE: usize = 2;

/// Build the sample program.
///
/// It exercises every basic opcode, then counts from 0 to 4 twice: once
/// keeping the counter in memory, once in a register. Expected output:
///
/// ```text
/// 0 3 37337 37337 0 1 2 3 4 0 1 2 3 4
/// ```
/// (one value per line).
pub fn sample_program() -> Program {
    Program::new(vec![
        // basic testing
        Instruction::Nop,
        Instruction::Nop,
        Instruction::Print { src: R0 },
        Instruction::Print { src: Pc },
        Instruction::Set {
            dest: R0,
            imm: 37337,
        },
        Instruction::Print { src: R0 },
        Instruction::Store { src: R0, addr: 0 },
        Instruction::Load { dest: R1, addr: 0 },
        Instruction::Print { src: R1 },
        // counter in memory
        Instruction::Set { dest: R2, imm: 5 },
        Instruction::Load { dest: R0, addr: 1 }, // 10
        Instruction::Print { src: R0 },
        Instruction::Set { dest: R1, imm: 1 },
        Instruction::Add { src: R1, dest: R0 },
        Instruction::Store { src: R0, addr: 1 },
        Instruction::Jgt {
            src: R2,
            dest: R0,
            target: 10,
        },
        // counter in a register
        Instruction::Set { dest: R0, imm: 0 },
        Instruction::Print { src: R0 }, // 17
        Instruction::Set { dest: R1, imm: 1 },
        Instruction::Add { src: R1, dest: R0 },
        Instruction::Jgt {
            src: R2,
            dest: R0,
            target: 17,
        },
    ])
}
