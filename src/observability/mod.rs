//! Observability for the codec
//!
//! Structured JSON logging of codec lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on decoding, validation or printing
//! 3. No global state: a `Logger` value is threaded explicitly
//!
//! # Usage
//!
//! ```ignore
//! use csp_json::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! let logger = Logger::new(Severity::Info);
//! log_event_with_fields(&logger, Event::DecodeComplete, &[("tokens", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

use crate::errors::CjError;

/// Log a lifecycle event
pub fn log_event(logger: &Logger, event: Event) {
    logger.log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(logger: &Logger, event: Event, fields: &[(&str, &str)]) {
    logger.log(event.severity(), event.as_str(), fields);
}

/// Log a failure event carrying the error's code, path and message
pub fn log_error(logger: &Logger, event: Event, err: &CjError) {
    if !logger.enabled(event.severity()) {
        return;
    }
    let fields = error_fields(err);
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    log_event_with_fields(logger, event, &borrowed);
}

fn error_fields(err: &CjError) -> [(&'static str, String); 4] {
    [
        ("code", err.code().code().to_string()),
        ("value", err.value().to_string()),
        ("path", err.path().unwrap_or("").to_string()),
        ("message", err.message().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::logger::capture_log;
    use super::*;
    use crate::errors::CjErrorCode;

    fn capture_error(event: Event, err: &CjError) -> serde_json::Value {
        let fields = error_fields(err);
        let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let line = capture_log(event.severity(), event.as_str(), &borrowed);
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn test_error_fields() {
        let err = CjError::at(CjErrorCode::VarRange, "vars[1]", "1 is outside [0, 1)");
        let parsed = capture_error(Event::ValidateFailed, &err);

        assert_eq!(parsed["event"], "VALIDATE_FAILED");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["code"], "CJ_ERROR_VALIDATION_VAR_RANGE");
        assert_eq!(parsed["value"], "-41");
        assert_eq!(parsed["path"], "vars[1]");
        assert_eq!(parsed["message"], "1 is outside [0, 1)");
    }

    #[test]
    fn test_error_fields_without_path() {
        let parsed = capture_error(Event::DecodeFailed, &CjError::arg("Empty document"));
        assert_eq!(parsed["code"], "CJ_ERROR_ARG");
        assert_eq!(parsed["value"], "-7");
        assert_eq!(parsed["path"], "");
    }

    #[test]
    fn test_thresholds_gate_events() {
        let logger = Logger::new(Severity::Info);
        assert!(!logger.enabled(Event::Token.severity()));
        assert!(logger.enabled(Event::DecodeComplete.severity()));
        assert!(logger.enabled(Event::DecodeFailed.severity()));
        assert!(!Logger::disabled().enabled(Event::DecodeFailed.severity()));
    }
}
