//! CLI-specific error types
//!
//! Every CLI error ends the process. The exit status of a codec failure is
//! the absolute value of its code.

use std::fmt;
use std::io;

use crate::errors::{CjError, CjErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (instance files, stdout)
    IoError,
    /// The codec rejected the input
    Codec(CjErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CJ_CLI_CONFIG_ERROR",
            Self::IoError => "CJ_CLI_IO_ERROR",
            Self::Codec(code) => code.code(),
        }
    }

    /// Process exit status for this error
    pub fn exit_status(&self) -> i32 {
        let value = match self {
            Self::ConfigError => CjErrorCode::Arg.value(),
            Self::IoError => -1,
            Self::Codec(code) => code.value(),
        };
        value.saturating_abs()
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit status
    pub fn exit_status(&self) -> i32 {
        self.code.exit_status()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<CjError> for CliError {
    fn from(e: CjError) -> Self {
        let message = match e.path() {
            Some(path) => format!("{} (at {})", e.message(), path),
            None => e.message().to_string(),
        };
        Self::new(CliErrorCode::Codec(e.code()), message)
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
