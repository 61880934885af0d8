//! Optional configuration for ocr-capture.
//!
//! Read from a JSON file: `~/.config/ocr-capture/config.json` (platform config
//! dir). Every field is optional and a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::TempLocation;
use crate::system::ToolPaths;

const APP_CONFIG_DIR_NAME: &str = "ocr-capture";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Some(Self::Error),
            "WARN" | "WARNING" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log_level: Option<String>,
    /// Overrides the OS temp directory as the root for generated files.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default)]
    pub osascript_path: Option<PathBuf>,
    #[serde(default)]
    pub screencapture_path: Option<PathBuf>,
}

impl Config {
    /// Unknown or missing levels fall back to `info`.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(LogLevel::from_str)
            .unwrap_or_default()
    }

    pub fn temp_location(&self) -> TempLocation {
        match self.temp_dir.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => TempLocation::new(dir),
            None => TempLocation::system(),
        }
    }

    pub fn tool_paths(&self) -> ToolPaths {
        let defaults = ToolPaths::default();
        ToolPaths {
            osascript: non_empty(&self.osascript_path).unwrap_or(defaults.osascript),
            screencapture: non_empty(&self.screencapture_path).unwrap_or(defaults.screencapture),
        }
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.clone().filter(|p| !p.as_os_str().is_empty())
}

pub fn config_path() -> Option<PathBuf> {
    let path = config_dir()?
        .join(APP_CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    Some(path)
}

/// Reads a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads the user's config, falling back to defaults on any problem.
///
/// Runs before logging is set up, so problems go to stderr.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!(
                "Config: failed to load {}, using defaults: {err}",
                path.display()
            );
            Config::default()
        }
    }
}
