//! File based tests: `parse_file` and configuration files

use shll::frontend::Frontend;
use shll::util::config::{load_config_file, resolve_config, OutputFormat, PROJECT_CONFIG_FILE};
use shll::util::logger::LogLevel;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.shll");
    fs::write(&path, "let greeting = \"hi\"\nprint(greeting)\n").unwrap();

    let program = shll::parse_file(&path).unwrap();
    assert_eq!(program.to_string(), "let greeting = \"hi\"\nprint(greeting)");
}

#[test]
fn test_parse_file_errors_carry_context() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.shll");
    let err = shll::parse_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"), "{}", err);

    let broken = dir.path().join("broken.shll");
    fs::write(&broken, "let = 1").unwrap();
    let err = shll::parse_file(&broken).unwrap_err();
    assert!(err.to_string().contains("broken.shll"), "{}", err);
    let root = err.root_cause().to_string();
    assert!(root.contains("unexpected '='"), "{}", root);
}

#[test]
fn test_project_config_drives_frontend() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        "[parser]\nmax_depth = 3\n\n[output]\nformat = \"ron\"\n\n[log]\nlevel = \"info\"\n",
    )
    .unwrap();

    let config = resolve_config(None, dir.path()).unwrap();
    assert_eq!(config.output.format, OutputFormat::Ron);
    assert_eq!(config.log.level, LogLevel::Info);

    let frontend = Frontend::with_config(config.parser);
    assert!(frontend.parse("f(x)").is_ok());
    assert!(frontend.parse("f(g(h(i(x))))").is_err());
}

#[test]
fn test_unknown_keys_are_ignored_but_bad_values_fail() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    fs::write(&path, "[output]\nindent = 2\ncolor = true\n").unwrap();
    assert_eq!(load_config_file(&path).unwrap().output.indent, 2);

    fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();
    assert!(load_config_file(&path).is_err());
}
