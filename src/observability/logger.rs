//! Structured JSON logger
//!
//! - One log line = one event
//! - Deterministic key ordering (event, severity, then fields sorted by key)
//! - Synchronous, no buffering
//! - Written to stderr so it never mixes with printed instances on stdout

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-token decoder detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Rejected input
    Warn = 2,
    /// Operation failures outside the codec (I/O, configuration)
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
///
/// The logger is a plain value built from configuration and passed to
/// whoever needs it; a disabled logger drops every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    min_severity: Option<Severity>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Logger {
    /// Logger emitting events at `min_severity` and above
    pub fn new(min_severity: Severity) -> Self {
        Self {
            min_severity: Some(min_severity),
        }
    }

    /// Logger that never writes
    pub fn disabled() -> Self {
        Self { min_severity: None }
    }

    /// Returns true if events of `severity` would be written
    pub fn enabled(&self, severity: Severity) -> bool {
        matches!(self.min_severity, Some(min) if severity >= min)
    }

    /// Log an event with the given severity and fields
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !self.enabled(severity) {
            return;
        }
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    /// Internal log implementation that writes to a given writer
    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut output = String::with_capacity(256);

        output.push('{');

        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');

        // One write per line
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    /// Escape special characters for JSON strings
    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
