//! TLR virtual machine: executes instruction streams over a register file
//! and a flat integer memory.
//!
//! The machine has:
//! - Six general-purpose `i32` registers plus the program counter
//! - A fixed-size, zero-initialized memory block
//! - A read-only, borrowed [`Program`]
//!
//! # Usage
//!
//! ```
//! use tlr_common::{Instruction, Program, Register};
//! use tlr_vm::Context;
//!
//! let program = Program::new(vec![
//!     Instruction::Set { dest: Register::R0, imm: 37337 },
//!     Instruction::Print { src: Register::R0 },
//! ]);
//!
//! let mut ctx = Context::with_output(&program, 0, Vec::new());
//! ctx.run().unwrap();
//! assert_eq!(ctx.pc(), 2);
//! assert_eq!(ctx.into_output(), b"37337\n");
//! ```

pub mod context;
pub mod error;
pub mod execute;

pub use context::Context;
pub use error::{AllocError, Fault, FaultKind};
pub use execute::RunState;

use tlr_common::Program;

/// Execute a program with `memory_size` words of memory, printing to
/// standard output.
///
/// # Errors
///
/// Returns the [`Fault`] that halted execution.
pub fn run(program: &Program, memory_size: usize) -> Result<(), Fault> {
    let mut ctx = Context::new(program, memory_size);
    ctx.run()
}
