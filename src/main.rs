//! sheetdb CLI entry point
//!
//! Initializes logging, then delegates to the CLI module. Errors are
//! printed to stderr with a non-zero exit.

use sheetdb::cli;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sheetdb=debug"));

    // stdout carries `mock` output
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
