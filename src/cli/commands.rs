//! CLI command implementations
//!
//! Commands are thin: read the input, call the codec, write the result.
//! Output goes to the writer they are given; `run` passes stdout.

use std::io::{self, Write};
use std::path::Path;

use crate::config::{CodecConfig, LogLevel};
use crate::csp::{decode_with, validate_with};
use crate::observability::{log_event_with_fields, Event};
use crate::tuples::parse_tuples_with;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_instance, write_csp, write_line};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = load_config(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(cli.command, &config, &mut out)
}

/// Build the effective configuration from `--config` and the log flags
///
/// `--trace` wins over `--verbose`; `--verbose` only ever lowers the
/// threshold to info.
pub fn load_config(cli: &Cli) -> CliResult<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            CodecConfig::load(path).map_err(|e| CliError::config_error(e.message()))?
        }
        None => CodecConfig::default(),
    };

    if cli.trace {
        config.log_level = LogLevel::Trace;
    } else if cli.verbose && !matches!(config.log_level, LogLevel::Trace | LogLevel::Info) {
        config.log_level = LogLevel::Info;
    }

    log_event_with_fields(
        &config.logger(),
        Event::ConfigLoaded,
        &[
            ("lex_mode", config.lex_mode.as_str()),
            ("max_tokens", &config.max_tokens.to_string()),
        ],
    );

    Ok(config)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cmd: Command, config: &CodecConfig, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Echo { csp } => echo(&csp, config, out),
        Command::Validate { csp } => validate(&csp, config, out),
        Command::Tuples {
            default_arity,
            json,
        } => tuples(default_arity, &json, config, out),
    }
}

/// Decode an instance and print its canonical form
pub fn echo<W: Write>(path: &Path, config: &CodecConfig, out: &mut W) -> CliResult<()> {
    let text = read_instance(path)?;
    let csp = decode_with(&text, config)?;
    write_csp(out, &csp)?;

    log_event_with_fields(
        &config.logger(),
        Event::PrintComplete,
        &[("path", &path.display().to_string())],
    );
    Ok(())
}

/// Decode and validate an instance
///
/// Writes `OK` on success. On any failure, reading included, writes
/// `Invalid` and returns the error.
pub fn validate<W: Write>(path: &Path, config: &CodecConfig, out: &mut W) -> CliResult<()> {
    let logger = config.logger();
    let outcome = read_instance(path).and_then(|text| {
        let csp = decode_with(&text, config)?;
        validate_with(&csp, &logger)?;
        Ok(())
    });

    match outcome {
        Ok(()) => write_line(out, "OK"),
        Err(e) => {
            write_line(out, "Invalid")?;
            Err(e)
        }
    }
}

/// Decode a bare tuple array and print it with its shape
pub fn tuples<W: Write>(
    default_arity: i32,
    json: &str,
    config: &CodecConfig,
    out: &mut W,
) -> CliResult<()> {
    let ts = parse_tuples_with(default_arity, json, config)?;
    write_line(
        out,
        &format!(
            "{{\"size\": {}, \"arity\": {}, \"tuples\": {}}}",
            ts.size, ts.arity, ts
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use crate::errors::CjErrorCode;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const SMALL: &str = "{
  \"meta\": {
    \"id\": \"test/small\",
    \"algo\": \"test\",
    \"params\": {\"vals\": 2, \"vars\": 2}
  },
  \"domains\": [
    {\"values\": [0, 1]}
  ],
  \"vars\": [0, 0],
  \"constraintDefs\": [
    {\"noGoods\": [[0, 0], [1, 1]]}
  ],
  \"constraints\": [
    {\"id\": 0, \"vars\": [0, 1]}
  ]
}
";

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        use clap::Parser;
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_echo_round_trips() {
        let file = file_with(SMALL);
        let mut out = Vec::new();
        echo(file.path(), &CodecConfig::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), SMALL);
    }

    #[test]
    fn test_echo_rejects_bad_instance() {
        let file = file_with("{\"meta\": 1}");
        let mut out = Vec::new();
        let err = echo(file.path(), &CodecConfig::default(), &mut out).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::Codec(CjErrorCode::CspJsonBadFieldCount));
        assert_eq!(err.exit_status(), 33);
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let file = file_with(SMALL);
        let mut out = Vec::new();
        validate(file.path(), &CodecConfig::default(), &mut out).unwrap();
        assert_eq!(out, b"OK\n");
    }

    #[test]
    fn test_validate_invalid() {
        let file = file_with(&SMALL.replace("\"vars\": [0, 0]", "\"vars\": [0, 1]"));
        let mut out = Vec::new();
        let err = validate(file.path(), &CodecConfig::default(), &mut out).unwrap_err();
        assert_eq!(out, b"Invalid\n");
        assert_eq!(err.code(), CliErrorCode::Codec(CjErrorCode::VarRange));
    }

    #[test]
    fn test_validate_unreadable() {
        let mut out = Vec::new();
        let err = validate(
            &PathBuf::from("/nonexistent/instance.json"),
            &CodecConfig::default(),
            &mut out,
        )
        .unwrap_err();
        assert_eq!(out, b"Invalid\n");
        assert_eq!(err.code(), CliErrorCode::IoError);
    }

    #[test]
    fn test_tuples() {
        let mut out = Vec::new();
        tuples(0, "[[1,2],[3,4]]", &CodecConfig::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"size\": 2, \"arity\": 2, \"tuples\": [[1, 2], [3, 4]]}\n"
        );

        let mut out = Vec::new();
        tuples(0, "[]", &CodecConfig::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"size\": 0, \"arity\": 0, \"tuples\": []}\n"
        );
    }

    #[test]
    fn test_tuples_error() {
        let mut out = Vec::new();
        let err = tuples(-1, "[1, \"2\"]", &CodecConfig::default(), &mut out).unwrap_err();
        assert_eq!(err.exit_status(), 35);
    }

    #[test]
    fn test_load_config_flags() {
        let config = load_config(&cli(&["cj", "-v", "tuples", "[]"])).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);

        let config = load_config(&cli(&["cj", "--trace", "-v", "tuples", "[]"])).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);

        let config = load_config(&cli(&["cj", "tuples", "[]"])).unwrap();
        assert_eq!(config.log_level, LogLevel::Off);
    }

    #[test]
    fn test_load_config_file() {
        let file = file_with(r#"{"lex_mode": "lenient", "log_level": "warn"}"#);
        let path = file.path().to_str().unwrap().to_string();

        let config = load_config(&cli(&["cj", "--config", &path, "tuples", "[]"])).unwrap();
        assert_eq!(config.lex_mode, crate::config::LexMode::Lenient);
        assert_eq!(config.log_level, LogLevel::Warn);

        let config = load_config(&cli(&["cj", "--config", &path, "-v", "tuples", "[]"])).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_load_config_bad_file() {
        let file = file_with("{\"lex_mode\": 3}");
        let path = file.path().to_str().unwrap().to_string();
        let err = load_config(&cli(&["cj", "--config", &path, "tuples", "[]"])).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert_eq!(err.exit_status(), 7);
    }

    #[test]
    fn test_run_command_dispatch() {
        let mut out = Vec::new();
        let cmd = cli(&["cj", "tuples", "[5]"]).command;
        run_command(cmd, &CodecConfig::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"size\": 1, \"arity\": -1, \"tuples\": [5]}\n"
        );
    }
}
