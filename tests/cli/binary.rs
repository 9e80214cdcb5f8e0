//! End-to-end tests running the msgpass binary
//!
//! Every run points at an explicit configuration file so the user's own
//! configuration never leaks in.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_msgpass(config: &NamedTempFile, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msgpass"))
        .arg("--config-file")
        .arg(config.path())
        .arg("--no-color")
        .args(extra)
        .output()
        .expect("failed to run msgpass")
}

#[test]
fn test_fixed_rounds_print_alternating_lines() {
    let config = config_file("");
    let output = run_msgpass(&config, &["--rounds", "3"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World!\n".repeat(3));
}

#[test]
fn test_texts_and_rounds_from_config_file() {
    let config = config_file("rounds = 2\nhello-text = \"Ping \"\nworld-text = \"Pong\\n\"\n");
    let output = run_msgpass(&config, &[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Ping Pong\nPing Pong\n");
}

#[test]
fn test_command_line_beats_config_file() {
    let config = config_file("rounds = 5\n");
    let output = run_msgpass(&config, &["-n", "1"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World!\n");
}

#[test]
fn test_invalid_config_value_exits_with_config_error() {
    let config = config_file("rounds = 0\n");
    let output = run_msgpass(&config, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rounds"), "stderr: {}", stderr);
}

#[test]
fn test_missing_config_file_exits_with_config_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_msgpass"))
        .args(["--config-file", "/nonexistent/msgpass.toml", "--rounds", "1"])
        .output()
        .expect("failed to run msgpass");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_json_logging_goes_to_stderr() {
    let config = config_file("");
    let output = run_msgpass(&config, &["-n", "1", "--log-level", "info", "--log-format", "json"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World!\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().expect("at least one log line");
    let value: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(value["level"], "INF");
}
