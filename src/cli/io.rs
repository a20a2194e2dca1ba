//! File and stdout handling for the CLI
//!
//! - Input: instance files, UTF-8 only
//! - Output: canonical text or a one-line verdict on stdout
//! - Diagnostics and logs never go to stdout

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::csp::{print_to, Csp};

use super::errors::{CliError, CliResult};

/// Read an instance file
pub fn read_instance(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Write the canonical form of an instance
pub fn write_csp<W: Write>(out: &mut W, csp: &Csp) -> CliResult<()> {
    print_to(out, csp)?;
    Ok(())
}

/// Write one line and flush
pub fn write_line<W: Write>(out: &mut W, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;

    #[test]
    fn test_read_missing_file() {
        let err = read_instance(Path::new("/nonexistent/instance.json")).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::IoError);
        assert!(err.message().contains("/nonexistent/instance.json"));
    }

    #[test]
    fn test_write_line() {
        let mut out = Vec::new();
        write_line(&mut out, "OK").unwrap();
        assert_eq!(out, b"OK\n");
    }
}
