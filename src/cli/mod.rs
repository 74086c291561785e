//! CLI module for sheetdb
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API over the spreadsheet or an in-memory table
//! - mock: Print generated customers

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_table, build_theme_store, mock, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
