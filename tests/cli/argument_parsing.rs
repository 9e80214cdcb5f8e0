//! CLI argument parsing tests
//!
//! Parsing through the public API, merged into settings without any
//! configuration file.

use clap::Parser;
use msgpass::app::cli::args::*;
use msgpass::app::cli::config::{Settings, DEFAULT_HELLO_TEXT, DEFAULT_WORLD_TEXT};
use std::time::Duration;

static COMMAND_NAME: &str = "msgpass";

#[test]
fn test_full_command_line_into_settings() {
    let args = Args::try_parse_from([
        COMMAND_NAME,
        "--rounds=2",
        "-i",
        "15",
        "--hello-text",
        "Ping ",
        "--log-level",
        "info",
        "--log-format",
        "ext",
        "--no-color",
    ])
    .unwrap();

    let settings = Settings::from_args(args, None);

    assert_eq!(settings.rounds, Some(2));
    assert_eq!(settings.interval, Some(Duration::from_millis(15)));
    assert_eq!(settings.hello_text, "Ping ");
    assert_eq!(settings.world_text, DEFAULT_WORLD_TEXT);
    assert_eq!(settings.log_level.as_deref(), Some("info"));
    assert_eq!(settings.log_format.as_deref(), Some("ext"));
    assert_eq!(settings.color, Some(false));
}

#[test]
fn test_minimal_command_line_uses_defaults() {
    let args = Args::try_parse_from([COMMAND_NAME]).unwrap();
    let settings = Settings::from_args(args, None);

    assert_eq!(settings.rounds, None);
    assert_eq!(settings.interval, None);
    assert_eq!(settings.hello_text, DEFAULT_HELLO_TEXT);
    assert_eq!(settings.world_text, DEFAULT_WORLD_TEXT);
    assert_eq!(settings.color, None);
}

#[test]
fn test_unknown_flag_rejected() {
    let err = Args::try_parse_from([COMMAND_NAME, "--turbo"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
}
