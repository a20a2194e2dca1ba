//! CLI argument definitions using clap
//!
//! Commands:
//! - cj echo --csp <path>
//! - cj validate --csp <path>
//! - cj tuples [--default-arity <n>] <json>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cj - decode, validate and print CSP-JSON instances
#[derive(Parser, Debug)]
#[command(name = "cj")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log codec events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every token the decoder visits
    #[arg(long, global = true)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an instance and print it in canonical form
    Echo {
        /// Path to the instance file
        #[arg(long)]
        csp: PathBuf,
    },

    /// Decode and validate an instance, printing OK or Invalid
    Validate {
        /// Path to the instance file
        #[arg(long)]
        csp: PathBuf,
    },

    /// Decode a bare tuple array and print it in canonical form
    Tuples {
        /// Arity given to an empty array
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        default_arity: i32,

        /// The tuple array, e.g. "[[0, 1], [1, 0]]"
        json: String,
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
    fn test_parse_echo() {
        let cli = Cli::try_parse_from(["cj", "echo", "--csp", "a.json"]).unwrap();
        assert!(matches!(cli.command, Command::Echo { ref csp } if csp == &PathBuf::from("a.json")));
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cj", "validate", "--csp", "a.json", "--config", "cj.json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cj.json")));
    }

    #[test]
    fn test_parse_tuples() {
        let cli = Cli::try_parse_from(["cj", "tuples", "--default-arity", "0", "[]"]).unwrap();
        match cli.command {
            Command::Tuples {
                default_arity,
                json,
            } => {
                assert_eq!(default_arity, 0);
                assert_eq!(json, "[]");
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli = Cli::try_parse_from(["cj", "tuples", "[1]"]).unwrap();
        assert!(matches!(cli.command, Command::Tuples { default_arity: -1, .. }));
    }

    #[test]
    fn test_missing_csp_rejected() {
        assert!(Cli::try_parse_from(["cj", "echo"]).is_err());
    }
}
