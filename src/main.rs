//! cj entry point
//!
//! Parses arguments, runs one command, reports failure on stderr and
//! exits with the magnitude of the error code.

use csp_json::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(e.exit_status());
    }
}
