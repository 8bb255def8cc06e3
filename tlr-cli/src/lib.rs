//! TLR command-line driver.
//!
//! The binary lives in `main.rs`; this library holds the pieces the
//! integration tests reach for directly.

pub mod commands;
pub mod sample;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging on stderr.
///
/// `RUST_LOG` overrides the filter. Otherwise only errors are shown;
/// `verbose` raises the level to `debug` (1) or `trace` (2 and up).
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
