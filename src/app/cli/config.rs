//! TOML configuration file parsing and loading
//!
//! This module handles loading of TOML configuration files, including default
//! config file discovery, and merges them with the command line into the
//! final `Settings`. Command-line values always win over file values.

use crate::app::cli::args::{Args, LOG_FORMATS, LOG_LEVELS};
use crate::core::error_handling::ContextualError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Text printed by the first printer unless configured otherwise
pub const DEFAULT_HELLO_TEXT: &str = "Hello ";
/// Text printed by the second printer unless configured otherwise
pub const DEFAULT_WORLD_TEXT: &str = "World!\n";

const KNOWN_KEYS: [&str; 9] = [
    "rounds",
    "interval-ms",
    "hello-text",
    "world-text",
    "log-level",
    "log-format",
    "log-file",
    "color",
    "no-color",
];

/// Configuration problem the user can fix
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Fully resolved application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rounds: Option<u64>,
    pub interval: Option<Duration>,
    pub hello_text: String,
    pub world_text: String,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    /// `None` means decide from whether the log stream is a terminal
    pub color: Option<bool>,
    /// The configuration file that was applied, if any
    pub config_file: Option<PathBuf>,
    /// Keys in the configuration file that were ignored
    pub unknown_keys: Vec<String>,
}

impl Settings {
    /// Merge command line, configuration file and defaults
    ///
    /// An explicitly given config file must exist. Without one, the default
    /// location is used only if a file is present there.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let config_path = match &args.config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::new(format!(
                    "The specified configuration file does not exist: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.exists()),
        };

        let mut merged = args.clone();
        let mut unknown_keys = Vec::new();
        if let Some(path) = &config_path {
            let config = load_config_file(path)?;
            unknown_keys = apply_toml_values(&mut merged, &config)?;
        }

        let mut settings = Self::from_args(merged, config_path);
        settings.unknown_keys = unknown_keys;
        Ok(settings)
    }

    /// Build settings from arguments that need no further merging
    pub fn from_args(args: Args, config_file: Option<PathBuf>) -> Self {
        let color = args.color_choice();
        Self {
            rounds: args.rounds,
            interval: args
                .interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            hello_text: args
                .hello_text
                .unwrap_or_else(|| DEFAULT_HELLO_TEXT.to_string()),
            world_text: args
                .world_text
                .unwrap_or_else(|| DEFAULT_WORLD_TEXT.to_string()),
            log_level: args.log_level,
            log_format: args.log_format,
            log_file: args.log_file.filter(|path| !is_disabled_log_file(path)),
            color,
            config_file,
            unknown_keys: Vec::new(),
        }
    }
}

/// `<config dir>/Msgpass/msgpass.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Msgpass").join("msgpass.toml"))
}

// Magic values "none" and "-" disable file logging
fn is_disabled_log_file(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.eq_ignore_ascii_case("none") || text == "-"
}

/// Read and parse a TOML configuration file
pub fn load_config_file(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::with_source(
            format!("Error reading configuration file {}: {}", path.display(), e),
            e,
        )
    })?;

    toml::from_str::<toml::Table>(&contents).map_err(|e| {
        ConfigError::with_source(
            format!("Error parsing configuration file {}: {}", path.display(), e),
            e,
        )
    })
}

/// Apply TOML configuration values to Args, keeping values already set
///
/// Returns the keys that were not recognised so the caller can warn about
/// them once logging is running.
pub fn apply_toml_values(
    args: &mut Args,
    config: &toml::Table,
) -> Result<Vec<String>, ConfigError> {
    let unknown_keys: Vec<String> = config
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();

    if args.rounds.is_none() {
        args.rounds = get_integer_at_least(config, "rounds", 1)?;
    }
    if args.interval_ms.is_none() {
        args.interval_ms = get_integer_at_least(config, "interval-ms", 0)?;
    }
    if args.hello_text.is_none() {
        args.hello_text = get_string(config, "hello-text")?;
    }
    if args.world_text.is_none() {
        args.world_text = get_string(config, "world-text")?;
    }
    if args.log_level.is_none() {
        args.log_level = get_choice(config, "log-level", &LOG_LEVELS)?;
    }
    if args.log_format.is_none() {
        args.log_format = get_choice(config, "log-format", &LOG_FORMATS)?;
    }
    if args.log_file.is_none() {
        args.log_file = get_string(config, "log-file")?.map(PathBuf::from);
    }

    if args.color_choice().is_none() {
        // Legacy support: no-color = true is the same as color = false
        let color = match get_bool(config, "color")? {
            Some(color) => Some(color),
            None => get_bool(config, "no-color")?.map(|no_color| !no_color),
        };
        match color {
            Some(true) => args.color = true,
            Some(false) => args.no_color = true,
            None => {}
        }
    }

    Ok(unknown_keys)
}

fn type_error(key: &str, expected: &str, value: &toml::Value) -> ConfigError {
    ConfigError::new(format!(
        "Invalid value for '{}' in configuration file: expected {}, found {}",
        key,
        expected,
        value.type_str()
    ))
}

fn get_string(config: &toml::Table, key: &str) -> Result<Option<String>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(type_error(key, "a string", other)),
    }
}

fn get_bool(config: &toml::Table, key: &str) -> Result<Option<bool>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(type_error(key, "a boolean", other)),
    }
}

fn get_integer_at_least(
    config: &toml::Table,
    key: &str,
    minimum: u64,
) -> Result<Option<u64>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(toml::Value::Integer(n)) => match u64::try_from(*n) {
            Ok(n) if n >= minimum => Ok(Some(n)),
            _ => Err(ConfigError::new(format!(
                "Invalid value for '{}' in configuration file: {} must be at least {}",
                key, n, minimum
            ))),
        },
        Some(other) => Err(type_error(key, "an integer", other)),
    }
}

fn get_choice(
    config: &toml::Table,
    key: &str,
    choices: &[&str],
) -> Result<Option<String>, ConfigError> {
    match get_string(config, key)? {
        Some(value) if choices.contains(&value.as_str()) => Ok(Some(value)),
        Some(value) => Err(ConfigError::new(format!(
            "Invalid value for '{}' in configuration file: '{}' is not one of {}",
            key,
            value,
            choices.join(", ")
        ))),
        None => Ok(None),
    }
}
