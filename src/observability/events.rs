//! Observable codec events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events of the codec and its tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Raw text split into tokens
    TokenizeComplete,
    /// A schema decoder visited a token
    Token,
    /// Instance decoded
    DecodeComplete,
    /// Decoding rejected the input
    DecodeFailed,
    /// Instance passed validation
    ValidateComplete,
    /// Instance failed validation
    ValidateFailed,
    /// Canonical form written
    PrintComplete,
}

impl Event {
    /// Returns the event name as it appears in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TokenizeComplete => "TOKENIZE_COMPLETE",
            Event::Token => "TOKEN",
            Event::DecodeComplete => "DECODE_COMPLETE",
            Event::DecodeFailed => "DECODE_FAILED",
            Event::ValidateComplete => "VALIDATE_COMPLETE",
            Event::ValidateFailed => "VALIDATE_FAILED",
            Event::PrintComplete => "PRINT_COMPLETE",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::Token | Event::TokenizeComplete => Severity::Trace,
            Event::DecodeFailed | Event::ValidateFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::DecodeComplete.as_str(), "DECODE_COMPLETE");
        assert_eq!(Event::Token.to_string(), "TOKEN");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::Token.severity(), Severity::Trace);
        assert_eq!(Event::DecodeFailed.severity(), Severity::Warn);
        assert_eq!(Event::PrintComplete.severity(), Severity::Info);
    }
}
