//! Core CLI arguments structure
//!
//! This module contains the Args struct definition and small accessors.
//! Configuration file merging lives in `config`.

use clap::Parser;
use std::path::PathBuf;

/// Valid values for `--log-level` and the `log-level` config key
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Valid values for `--log-format` and the `log-format` config key
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

// Command-line options for the ping-pong demo
//
// Every value is optional here so that the configuration file can fill in
// whatever was not given on the command line.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "msgpass")]
#[command(about = "Two threads playing ping-pong over blocking message queues")]
#[command(version, long_version = crate::core::version::LONG_VERSION)]
#[command(after_help = "Without --rounds the demo runs until interrupted (Ctrl-C).")]
pub struct Args {
    /// Messages each printer relays before stopping
    #[arg(short = 'n', long = "rounds", value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
    pub rounds: Option<u64>,

    /// Pause between relays in milliseconds
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Text printed by the first printer
    #[arg(long = "hello-text", value_name = "TEXT")]
    pub hello_text: Option<String>,

    /// Text printed by the second printer
    #[arg(long = "world-text", value_name = "TEXT")]
    pub world_text: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force coloured log output
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour choice from the command line alone
    ///
    /// `Some(true)` for --color, `Some(false)` for --no-color, `None` when
    /// neither was given.
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
