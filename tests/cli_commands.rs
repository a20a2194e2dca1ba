//! End-to-end tests of the cj binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn cj(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cj"))
        .args(args)
        .output()
        .unwrap()
}

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).unwrap()
}

#[test]
fn test_echo_prints_canonical_form() {
    let path = data("triangle-coloring.json");
    let out = cj(&["echo", "--csp", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), fs::read_to_string(&path).unwrap());
    assert!(stderr(&out).is_empty());
}

#[test]
fn test_echo_normalizes_compact_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compact.json");
    fs::write(
        &path,
        r#"{"vars":[0,0],"meta":{"id":"test/small","algo":"test","params":{"vals": 2, "vars": 2}},"domains":[{"values":[0,1]}],"constraintDefs":[{"noGoods":[[0,0],[1,1]]}],"constraints":[{"vars":[0,1],"id":0}]}"#,
    )
    .unwrap();

    let out = cj(&["echo", "--csp", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), fs::read_to_string(data("small.json")).unwrap());
}

#[test]
fn test_echo_reports_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"meta": [], "domains": [], "vars": [], "constraintDefs": [], "constraints": []}"#).unwrap();

    let out = cj(&["echo", "--csp", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(9));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("CJ_ERROR_META_IS_NOT_OBJECT"));
}

#[test]
fn test_echo_missing_file() {
    let out = cj(&["echo", "--csp", "/nonexistent/instance.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("CJ_CLI_IO_ERROR"));
}

#[test]
fn test_validate_positive_fixtures() {
    for name in ["min.json", "small.json", "triangle-coloring.json", "mixed-arity.json"] {
        let out = cj(&["validate", "--csp", data(name).to_str().unwrap()]);
        assert!(out.status.success(), "{}", name);
        assert_eq!(stdout(&out), "OK\n");
    }
}

#[test]
fn test_validate_negative_fixture() {
    let path = data("validation-neg").join("constraint-id-range.json");
    let out = cj(&["validate", "--csp", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(45));
    assert_eq!(stdout(&out), "Invalid\n");
    assert!(stderr(&out).contains("constraints[0].id"));
}

#[test]
fn test_tuples_command() {
    let out = cj(&["tuples", "[[0, 1], [1, 0]]"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "{\"size\": 2, \"arity\": 2, \"tuples\": [[0, 1], [1, 0]]}\n"
    );

    let out = cj(&["tuples", "--default-arity", "3", "[]"]);
    assert_eq!(stdout(&out), "{\"size\": 0, \"arity\": 3, \"tuples\": []}\n");

    let out = cj(&["tuples", "--default-arity", "-2", "[]"]);
    assert_eq!(out.status.code(), Some(7));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let path = data("small.json");
    let out = cj(&["-v", "echo", "--csp", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), fs::read_to_string(&path).unwrap());

    let err = stderr(&out);
    assert!(err.contains("\"event\":\"DECODE_COMPLETE\""));
    assert!(err.contains("\"event\":\"PRINT_COMPLETE\""));
    assert!(!err.contains("\"event\":\"TOKEN\""));
}

#[test]
fn test_trace_logs_tokens() {
    let out = cj(&["--trace", "validate", "--csp", data("min.json").to_str().unwrap()]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("\"event\":\"TOKEN\""));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cj.json");
    fs::write(&config, r#"{"lex_mode": "lenient", "max_tokens": 5}"#).unwrap();

    let out = cj(&[
        "--config",
        config.to_str().unwrap(),
        "validate",
        "--csp",
        data("small.json").to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "Invalid\n");
    assert!(stderr(&out).contains("CJ_ERROR_JSMN_NOMEM"));

    fs::write(&config, r#"{"colour": "red"}"#).unwrap();
    let out = cj(&["--config", config.to_str().unwrap(), "tuples", "[]"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(stderr(&out).contains("CJ_CLI_CONFIG_ERROR"));
}
