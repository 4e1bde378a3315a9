//! Integration tests for the `shll` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary inside `dir`, isolated from any user configuration
fn shll(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shll"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("HOME", dir)
        .output()
        .unwrap()
}

fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_check_valid_file() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "valid.shll", "let id = (x) => x\nid(1)\n");

    let output = shll(dir.path(), &["check", "valid.shll"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "ok\n");
}

#[test]
fn test_check_invalid_file_renders_diagnostic() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "invalid.shll", "let x = 1\nlet 42\n");

    let output = shll(dir.path(), &["check", "invalid.shll"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error [E0201]"), "{}", err);
    assert!(err.contains(" --> invalid.shll:2:5"), "{}", err);
    assert!(err.contains("   2 | let 42"), "{}", err);
    assert!(!err.contains('\x1b'), "{}", err);
}

#[test]
fn test_check_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = shll(dir.path(), &["check", "nope.shll"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read file"));
}

#[test]
fn test_tokens() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "t.shll", "let x = 1");

    let output = shll(dir.path(), &["tokens", "t.shll"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "1:1 KwLet let");
    assert_eq!(lines[3], "1:9 Integer 1");
    assert!(lines[4].starts_with("1:10 Eof"));
}

#[test]
fn test_tokens_lexical_error() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "bad.shll", "let x = 'ab'");

    let output = shll(dir.path(), &["tokens", "bad.shll"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error [E0103]"), "{}", stderr(&output));
}

#[test]
fn test_parse_eval_formats() {
    let dir = TempDir::new().unwrap();

    let output = shll(dir.path(), &["parse", "-e", "f(x)", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(json["terms"][0]["PositionalApply"].is_object(), "{}", json);

    let output = shll(dir.path(), &["parse", "-e", "block { a b }", "--format", "pretty"]);
    assert_eq!(stdout(&output), "block {\n    a\n    b\n}\n");

    let output = shll(dir.path(), &["parse", "-e", "x", "--format", "yaml"]);
    assert!(!output.status.success());
}

#[test]
fn test_parse_uses_project_config() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "shll.toml", "[output]\nformat = \"pretty\"\nindent = 2\n");
    create_test_file(&dir, "main.shll", "block { a }");

    let output = shll(dir.path(), &["parse", "main.shll"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "block {\n  a\n}\n");
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let output = shll(dir.path(), &["--config", "missing.toml", "parse", "-e", "x"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_fmt_and_check() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "messy.shll", "let   x=1 block{a   b}");

    let output = shll(dir.path(), &["fmt", "messy.shll"]);
    assert!(output.status.success());
    let formatted = stdout(&output);
    assert_eq!(formatted, "let x = 1\nblock {\n    a\n    b\n}\n");

    let output = shll(dir.path(), &["fmt", "--check", "messy.shll"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is not formatted"));

    create_test_file(&dir, "clean.shll", &formatted);
    let output = shll(dir.path(), &["fmt", "--check", "clean.shll"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_explain() {
    let dir = TempDir::new().unwrap();
    let output = shll(dir.path(), &["explain", "e0203"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("E0203: nesting too deep\n"), "{}", text);
    assert!(text.contains("help: "));

    let output = shll(dir.path(), &["explain", "E9999"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown error code"));
}

#[test]
fn test_long_chain_is_reported_not_aborted() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "chain.shll", &format!("x{}", ".a".repeat(100_000)));

    let output = shll(dir.path(), &["check", "chain.shll"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error [E0203]"), "{}", stderr(&output));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let output = shll(dir.path(), &["version"]);
    assert_eq!(stdout(&output), format!("SHLL {}\n", env!("CARGO_PKG_VERSION")));
}
