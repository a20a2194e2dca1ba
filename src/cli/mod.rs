//! CLI module for cj
//!
//! Provides command-line interface for:
//! - echo: Decode an instance and print it canonically
//! - validate: Decode and validate an instance
//! - tuples: Decode a bare tuple array

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{echo, load_config, run, run_command, tuples, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_instance, write_csp, write_line};
