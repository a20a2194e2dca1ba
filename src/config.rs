//! Codec configuration
//!
//! A single value threaded explicitly into the tokenizer and decoders.
//! Loaded from a JSON file; every field is optional.
//!
//! ```json
//! { "lex_mode": "strict", "log_level": "off", "max_tokens": 0 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CjError, CjResult};
use crate::observability::{Logger, Severity};

/// Tokenizer behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexMode {
    /// JSON grammar enforced; primitives must be literals or numbers
    #[default]
    Strict,
    /// Any unquoted run is a primitive; only brackets and escapes are checked
    Lenient,
}

impl LexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexMode::Strict => "strict",
            LexMode::Lenient => "lenient",
        }
    }
}

/// Minimum severity written by the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Off,
    Trace,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the matching logger severity, `None` when logging is off
    pub fn severity(&self) -> Option<Severity> {
        match self {
            LogLevel::Off => None,
            LogLevel::Trace => Some(Severity::Trace),
            LogLevel::Info => Some(Severity::Info),
            LogLevel::Warn => Some(Severity::Warn),
            LogLevel::Error => Some(Severity::Error),
        }
    }
}

/// Configuration of the codec
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Tokenizer mode (default: strict)
    #[serde(default)]
    pub lex_mode: LexMode,

    /// Minimum logged severity (default: off)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Maximum number of tokens a document may need, 0 for no limit
    #[serde(default)]
    pub max_tokens: usize,
}

impl CodecConfig {
    /// Strict, silent, unlimited
    pub fn new() -> Self {
        Self::default()
    }

    /// Same configuration with a different tokenizer mode
    pub fn with_lex_mode(mut self, lex_mode: LexMode) -> Self {
        self.lex_mode = lex_mode;
        self
    }

    /// Same configuration with a different log level
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Same configuration with a token limit
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builds the logger described by this configuration
    pub fn logger(&self) -> Logger {
        match self.log_level.severity() {
            Some(severity) => Logger::new(severity),
            None => Logger::disabled(),
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CjResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CjError::arg(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON text
    pub fn from_json(content: &str) -> CjResult<Self> {
        let config: CodecConfig = serde_json::from_str(content)
            .map_err(|e| CjError::arg(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> CjResult<()> {
        // A document always needs at least one token
        if self.max_tokens == 1 {
            return Err(CjError::arg(
                "max_tokens must be 0 (unlimited) or at least 2",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CjErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::from_json("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.lex_mode, LexMode::Strict);
        assert_eq!(config.log_level, LogLevel::Off);
        assert_eq!(config.max_tokens, 0);
        assert!(!config.logger().enabled(Severity::Error));
    }

    #[test]
    fn test_parse_all_fields() {
        let config = CodecConfig::from_json(
            r#"{"lex_mode": "lenient", "log_level": "trace", "max_tokens": 4096}"#,
        )
        .unwrap();
        assert_eq!(config.lex_mode, LexMode::Lenient);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_tokens, 4096);
        assert!(config.logger().enabled(Severity::Trace));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CodecConfig::from_json(r#"{"strict": true}"#).unwrap_err();
        assert_eq!(err.code(), CjErrorCode::Arg);
    }

    #[test]
    fn test_bad_mode_rejected() {
        assert!(CodecConfig::from_json(r#"{"lex_mode": "loose"}"#).is_err());
    }

    #[test]
    fn test_max_tokens_of_one_rejected() {
        let err = CodecConfig::from_json(r#"{"max_tokens": 1}"#).unwrap_err();
        assert!(err.message().contains("max_tokens"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "info"}}"#).unwrap();

        let config = CodecConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CodecConfig::load(Path::new("/nonexistent/cj.json")).unwrap_err();
        assert_eq!(err.code(), CjErrorCode::Arg);
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::new()
            .with_lex_mode(LexMode::Lenient)
            .with_log_level(LogLevel::Warn)
            .with_max_tokens(10);
        assert_eq!(config.lex_mode, LexMode::Lenient);
        assert_eq!(config.log_level.severity(), Some(Severity::Warn));
        assert_eq!(config.max_tokens, 10);
    }
}
