//! SHLL configuration
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. Explicit path (--config)
//! 2. Project-level (./shll.toml)
//! 3. User-level ($XDG_CONFIG_HOME/shll/config.toml or ~/.config/shll/config.toml)
//! 4. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use shll::util::config::ShllConfig;
//!
//! let config: ShllConfig = toml::from_str("[parser]\nmax_depth = 64").unwrap();
//! assert_eq!(config.parser.max_depth, 64);
//! ```

use crate::frontend::parser::ParserConfig;
use crate::frontend::printer::PrettyConfig;
use crate::util::logger::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "shll.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShllConfig {
    /// Parser settings
    #[serde(default)]
    pub parser: ParserConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// How `parse` dumps a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Debug,
    Json,
    Ron,
    Pretty,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(OutputFormat::Debug),
            "json" => Ok(OutputFormat::Json),
            "ron" => Ok(OutputFormat::Ron),
            "pretty" => Ok(OutputFormat::Pretty),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Debug => "debug",
            OutputFormat::Json => "json",
            OutputFormat::Ron => "ron",
            OutputFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default dump format
    #[serde(default)]
    pub format: OutputFormat,
    /// Indent width for pretty printing
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    PrettyConfig::default().indent
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            indent: default_indent(),
        }
    }
}

impl OutputConfig {
    pub fn pretty(&self) -> PrettyConfig {
        PrettyConfig {
            indent: self.indent,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            return Some(PathBuf::from(xdg_config).join("shll"));
        }
    }

    // Fallback to ~/.config/shll
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("shll"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("shll"));
    }

    None
}

/// Get the user config file path (~/.config/shll/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load a configuration file
pub fn load_config_file(path: &Path) -> Result<ShllConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the configuration.
///
/// An explicit path must exist. Otherwise the first existing file among the
/// project file in `project_dir` and the user file is used, falling back to
/// defaults.
pub fn resolve_config(explicit: Option<&Path>, project_dir: &Path) -> Result<ShllConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return load_config_file(path);
    }

    let project = project_dir.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_config_file(&project);
    }

    if let Some(user) = get_config_path() {
        if user.exists() {
            return load_config_file(&user);
        }
    }

    debug!("No config file found, using defaults");
    Ok(ShllConfig::default())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {1}", path = .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
    #[error("Config parse error in {path}: {1}", path = .0.display())]
    ParseError(PathBuf, #[source] toml::de::Error),
    #[error("Config file not found: {path}", path = .0.display())]
    NotFound(PathBuf),
}
