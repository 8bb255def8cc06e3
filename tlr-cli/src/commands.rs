//! CLI command implementations.
//!
//! Each command returns `Err(code)` with the process exit code after
//! printing its own diagnostics.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use crate::sample::{sample_program, SAMPLE_MEMORY_SIZE};
use tlr_common::Program;
use tlr_vm::{Context, RunState};

/// Exit code for unreadable input, bad encodings, and usage errors.
pub const EXIT_INPUT: i32 = 1;
/// Exit code for programs rejected by the verifier.
pub const EXIT_VERIFY: i32 = 2;
/// Exit code for runtime faults.
pub const EXIT_FAULT: i32 = 3;
/// Exit code when `--max-steps` stops a run before completion.
pub const EXIT_STEP_LIMIT: i32 = 4;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Program file (.tlrb). Runs the built-in sample when omitted.
    pub file: Option<PathBuf>,

    /// Words of memory to give the program
    #[arg(short, long, default_value_t = SAMPLE_MEMORY_SIZE)]
    pub memory: usize,

    /// Verify the program before running it
    #[arg(long)]
    pub verify: bool,

    /// Stop after this many steps
    #[arg(long)]
    pub max_steps: Option<u64>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Program file (.tlrb)
    pub file: PathBuf,

    /// Words of memory the program will run with
    #[arg(short, long, default_value_t = SAMPLE_MEMORY_SIZE)]
    pub memory: usize,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Program file (.tlrb). Dumps the built-in sample when omitted.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Where to write the encoded sample program
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute a program, optionally verifying it first.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let program = load(args.file.as_deref())?;

    if args.verify {
        check(&program, args.memory, &display_name(args.file.as_deref()))?;
    }

    info!(
        instructions = program.len(),
        memory = args.memory,
        "executing program"
    );
    let mut ctx = Context::try_new(&program, args.memory).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_INPUT
    })?;
    let result = match args.max_steps {
        Some(max) => ctx.run_for(max),
        None => ctx.run().map(|()| RunState::Completed),
    };

    match result {
        Ok(RunState::Completed) => Ok(()),
        Ok(RunState::Suspended) => {
            eprintln!("stopped: step limit reached at pc {}", ctx.pc());
            Err(EXIT_STEP_LIMIT)
        }
        Err(fault) => {
            eprintln!("runtime fault: {fault}");
            Err(EXIT_FAULT)
        }
    }
}

/// Verify a program file.
pub fn verify(args: &VerifyArgs) -> Result<(), i32> {
    let program = read_binary(&args.file)?;
    check(&program, args.memory, &args.file.display().to_string())?;
    println!(
        "OK: {} ({} instructions)",
        args.file.display(),
        program.len()
    );
    Ok(())
}

/// Print a numbered listing of a program.
pub fn dump(args: &DumpArgs) -> Result<(), i32> {
    let program = load(args.file.as_deref())?;
    print!("{}", listing(&program));
    Ok(())
}

/// Write the built-in sample program as a binary file.
pub fn sample(args: &SampleArgs) -> Result<(), i32> {
    let program = sample_program();
    let bytes = program.encode();

    fs::write(&args.output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", args.output.display());
        EXIT_INPUT
    })?;

    eprintln!(
        "wrote {} instructions ({} bytes) -> {}",
        program.len(),
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

/// Render one line per instruction: index, then the decoded form.
pub fn listing(program: &Program) -> String {
    let mut out = String::new();
    for index in 0..program.len() {
        let line = match program.fetch(index) {
            Some(Ok(instr)) => instr.to_string(),
            Some(Err(e)) => format!("<{e}>"),
            None => break,
        };
        out.push_str(&format!("{index:4}  {line}\n"));
    }
    out
}

// --- Helpers ---

/// Load a program file, or the sample program when no path is given.
fn load(path: Option<&Path>) -> Result<Program, i32> {
    match path {
        Some(path) => read_binary(path),
        None => {
            debug!("no program file given, using the sample program");
            Ok(sample_program())
        }
    }
}

/// Read and decode a .tlrb binary file.
fn read_binary(path: &Path) -> Result<Program, i32> {
    let bytes = fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        EXIT_INPUT
    })?;

    let program = Program::decode(&bytes).map_err(|e| {
        eprintln!("error: invalid binary: {e}");
        EXIT_INPUT
    })?;
    debug!(path = %path.display(), instructions = program.len(), "loaded program");
    Ok(program)
}

/// Run the verifier, printing every error.
fn check(program: &Program, memory_size: usize, name: &str) -> Result<(), i32> {
    tlr_verifier::verify(program, memory_size).map_err(|errors| {
        for e in &errors {
            eprintln!("error: {e}");
        }
        debug!(program = name, errors = errors.len(), "verification failed");
        EXIT_VERIFY
    })
}

fn display_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<sample>".to_owned(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlr_common::{Instruction, RawInstruction, Register};

    #[test]
    fn listing_numbers_each_instruction() {
        let program = Program::new(vec![
            Instruction::Set {
                dest: Register::R0,
                imm: 37337,
            },
            Instruction::Print { src: Register::R0 },
        ]);
        assert_eq!(listing(&program), "   0  set r0, 37337\n   1  print r0\n");
    }

    #[test]
    fn listing_marks_bad_records() {
        let program = Program::from_raw(vec![RawInstruction {
            opcode: 12,
            ..RawInstruction::default()
        }]);
        assert_eq!(listing(&program), "   0  <invalid opcode: 12>\n");
    }

    #[test]
    fn sample_display_name() {
        assert_eq!(display_name(None), "<sample>");
        assert_eq!(display_name(Some(Path::new("a.tlrb"))), "a.tlrb");
    }
}
