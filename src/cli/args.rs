//! CLI argument definitions using clap
//!
//! Commands:
//! - sheetdb serve [--config <path>] [--port <port>] [--in-memory [--mock-count <n>]]
//! - sheetdb mock [--count <n>] [--seed <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sheetdb - customer records backed by a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "sheetdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding configuration
        #[arg(long)]
        port: Option<u16>,

        /// Serve from an in-memory table instead of the spreadsheet
        #[arg(long)]
        in_memory: bool,

        /// Number of mock customers to preload into the in-memory table
        #[arg(long, default_value_t = 0, requires = "in_memory")]
        mock_count: usize,
    },

    /// Print generated mock customers as JSON
    Mock {
        /// Number of customers to generate
        #[arg(long, default_value_t = 50)]
        count: usize,

        /// Random seed, for repeatable output
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["sheetdb", "serve"]).unwrap();
        match cli.command {
            Command::Serve {
                config,
                port,
                in_memory,
                mock_count,
            } => {
                assert!(config.is_none());
                assert!(port.is_none());
                assert!(!in_memory);
                assert_eq!(mock_count, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_in_memory() {
        let cli = Cli::try_parse_from([
            "sheetdb",
            "serve",
            "--in-memory",
            "--mock-count",
            "50",
            "--port",
            "9000",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve {
                in_memory: true,
                mock_count: 50,
                port: Some(9000),
                ..
            }
        ));
    }

    #[test]
    fn test_mock_count_requires_in_memory() {
        assert!(Cli::try_parse_from(["sheetdb", "serve", "--mock-count", "5"]).is_err());
        assert!(Cli::try_parse_from(["sheetdb", "serve", "--in-memory", "--seed", "5"]).is_err());
    }

    #[test]
    fn test_parse_mock() {
        let cli = Cli::try_parse_from(["sheetdb", "mock", "--count", "3", "--seed", "9"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Mock {
                count: 3,
                seed: Some(9)
            }
        ));
    }
}
