//! CLI command definitions for the `lpost` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod commands;
pub mod compose;
pub mod input;
pub mod stats;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use letterpost_types::session::OwnerId;

/// Write letters one question at a time.
#[derive(Parser)]
#[command(name = "lpost", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "LETTERPOST_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a letter interactively in the terminal.
    #[command(alias = "write")]
    Compose {
        /// Owner the letter is composed for.
        #[arg(long, default_value = "0")]
        owner: OwnerId,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Show how many letters have been delivered.
    Stats {
        /// Also show the count for one owner.
        #[arg(long)]
        owner: Option<OwnerId>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compose_owner() {
        let cli = Cli::try_parse_from(["lpost", "compose", "--owner", "42"]).unwrap();
        match cli.command {
            Commands::Compose { owner } => assert_eq!(owner, OwnerId(42)),
            _ => panic!("expected compose"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["lpost", "-vv", "serve"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, 3000);
                assert_eq!(host, "127.0.0.1");
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_owner() {
        assert!(Cli::try_parse_from(["lpost", "stats", "--owner", "abc"]).is_err());
    }
}
