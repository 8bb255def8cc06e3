//! TLR CLI: run, verify, and inspect Tiny Language Runtime programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/decode/usage error
//! - 2: Verification failure
//! - 3: Runtime fault
//! - 4: Step limit reached

use std::process;

use clap::{Parser, Subcommand};

use tlr_cli::commands::{self, DumpArgs, RunArgs, SampleArgs, VerifyArgs, EXIT_INPUT};

#[derive(Parser, Debug)]
#[command(name = "tlr", version, about = "Tiny Language Runtime")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program (the built-in sample when no file is given)
    Run(RunArgs),
    /// Verify a binary program
    Verify(VerifyArgs),
    /// Print a numbered listing of a program
    Dump(DumpArgs),
    /// Write the built-in sample program to a file
    Sample(SampleArgs),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // `--help` and `--version` succeed only if their text was written.
            let code = match e.print() {
                Ok(()) if !e.use_stderr() => 0,
                _ => EXIT_INPUT,
            };
            process::exit(code);
        }
    };

    tlr_cli::init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Run(args) => commands::run(args),
        Commands::Verify(args) => commands::verify(args),
        Commands::Dump(args) => commands::dump(args),
        Commands::Sample(args) => commands::sample(args),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
