//! TLR verifier: static analysis for instruction streams.
//!
//! The verifier checks a `Program` BEFORE execution for faults that can be
//! detected without running it. It collects ALL errors (not just the first)
//! and returns them. Programs that fail verification can still be executed;
//! the machine faults when it reaches a bad instruction.
//!
//! # Usage
//!
//! ```
//! use tlr_common::{Instruction, Program, Register};
//! use tlr_verifier::verify;
//!
//! let program = Program::new(vec![
//!     Instruction::Set { dest: Register::R0, imm: 37337 },
//!     Instruction::Print { src: Register::R0 },
//! ]);
//!
//! assert!(verify(&program, 0).is_ok());
//! ```
//!
//! # Passes
//!
//! 1. **Limits**: program size fits the PC register
//! 2. **Structural**: every record decodes, unused fields are zero
//! 3. **Bounds**: static jump targets, memory offsets, PC writes
//! 4. **Exit**: the final instruction can fall through

pub mod bounds;
pub mod error;
pub mod exit;
pub mod limits;
pub mod structural;

pub use error::VerifyError;

use tlr_common::Program;

/// Verify a program that will run with `memory_size` words of memory.
///
/// Returns `Ok(())` if the program passes all checks, or
/// `Err(Vec<VerifyError>)` with all errors found.
pub fn verify(program: &Program, memory_size: usize) -> Result<(), Vec<VerifyError>> {
    let mut all_errors = Vec::new();

    // Pass 1: Limits (independent)
    all_errors.extend(limits::check_limits(program.len()));

    // Pass 2: Structural (builds ProgramContext)
    let (ctx, structural_errors) =
        structural::check_structural(program.raw_instructions(), memory_size);
    all_errors.extend(structural_errors);

    // Passes 3-4 skip undecodable slots, so they always run.
    all_errors.extend(bounds::check_bounds(&ctx));
    all_errors.extend(exit::check_exit(&ctx));

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors)
    }
}
