//! Limits checking for TLR programs.

use crate::error::VerifyError;

/// Maximum program size in instructions. The PC is an `i32` register and
/// must be able to hold the program length.
pub const MAX_PROGRAM_SIZE: usize = i32::MAX as usize;

/// Run the limits check.
pub fn check_limits(len: usize) -> Vec<VerifyError> {
    let mut errors = Vec::new();

    if len > MAX_PROGRAM_SIZE {
        errors.push(VerifyError::ProgramTooLarge {
            size: len,
            max: MAX_PROGRAM_SIZE,
        });
    }

    errors
}
