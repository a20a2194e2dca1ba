//! Canonical round trip over the fixture instances
//!
//! Every file under tests/data is canonical and valid: decoding it,
//! validating it and printing it again must reproduce the file exactly.

use csp_json::{decode, decode_with, print, print_to, validate, CjErrorCode, CodecConfig, LexMode};
use std::fs;
use std::path::{Path, PathBuf};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_fixtures_present() {
    assert!(json_files(&data_dir()).len() >= 4);
}

#[test]
fn test_round_trip_is_identity() {
    for path in json_files(&data_dir()) {
        let text = fs::read_to_string(&path).unwrap();
        let csp = decode(&text).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        validate(&csp).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        assert_eq!(print(&csp), text, "{}", path.display());
    }
}

#[test]
fn test_round_trip_through_writer() {
    for path in json_files(&data_dir()) {
        let text = fs::read_to_string(&path).unwrap();
        let csp = decode(&text).unwrap();
        let mut out = Vec::new();
        print_to(&mut out, &csp).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }
}

#[test]
fn test_lenient_mode_accepts_canonical_text() {
    let config = CodecConfig::default().with_lex_mode(LexMode::Lenient);
    for path in json_files(&data_dir()) {
        let text = fs::read_to_string(&path).unwrap();
        let csp = decode_with(&text, &config).unwrap();
        assert_eq!(print(&csp), text);
    }
}

#[test]
fn test_decoded_shapes() {
    let text = fs::read_to_string(data_dir().join("mixed-arity.json")).unwrap();
    let csp = decode(&text).unwrap();

    assert_eq!(csp.meta.id, "test/mixed-arity");
    assert_eq!(csp.meta.params_json, r#"[1, -2, {"seed": 7}]"#);
    assert_eq!(csp.domains.len(), 2);
    assert_eq!(csp.vars.data, vec![0, 1, 1, 0]);
    assert_eq!(csp.constraint_defs[0].tuples().arity, 3);
    assert_eq!(csp.constraint_defs[1].tuples().arity, 2);
    assert_eq!(csp.constraint_defs[2].tuples().size, 0);
    assert_eq!(csp.constraints[2].vars.size, 0);
    assert_eq!(csp.constraints[3].vars.data, vec![3, 3]);
}

#[test]
fn test_truncated_fixture_fails() {
    let text = fs::read_to_string(data_dir().join("small.json")).unwrap();
    for cut in [1, text.len() / 2, text.len() - 3] {
        let err = decode(&text[..cut]).unwrap_err();
        assert_eq!(err.code(), CjErrorCode::JsmnPart, "cut at {}", cut);
    }
}

#[test]
fn test_token_limit_applies_to_fixtures() {
    let text = fs::read_to_string(data_dir().join("triangle-coloring.json")).unwrap();
    let err = decode_with(&text, &CodecConfig::default().with_max_tokens(10)).unwrap_err();
    assert_eq!(err.code(), CjErrorCode::JsmnNoMem);
    assert!(decode_with(&text, &CodecConfig::default().with_max_tokens(1000)).is_ok());
}
