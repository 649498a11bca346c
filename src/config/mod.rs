//! Configuration for the terminal front-end
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables
//! 3. Config file (~/.config/ccforge/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::tui::scroll::DEFAULT_RESERVED_ROWS;
use crate::tui::transcript::DEFAULT_MAX_LINES;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable names
pub const ENV_MAX_LINES: &str = "CCFORGE_MAX_LINES";
pub const ENV_DEMO: &str = "CCFORGE_DEMO";
pub const ENV_LOG_LEVEL: &str = "CCFORGE_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Transcript line bound (0 = unbounded)
    pub max_lines: usize,

    /// Rows of the output pane not used for transcript lines
    pub reserved_rows: usize,

    /// Demo mode: emit mock process events instead of waiting for real ones
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            reserved_rows: DEFAULT_RESERVED_ROWS,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure. Every key is optional; missing keys fall back.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub max_lines: Option<usize>,
    pub reserved_rows: Option<usize>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/ccforge/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("ccforge").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Config is optional, so a failed write only costs the template
        if let Err(e) = Self::write_template(&path) {
            tracing::debug!(path = %path.display(), error = %e, "Could not write config template");
        }
    }

    /// Overwrite the config file with the default template
    pub fn reset_config_file() -> Result<PathBuf> {
        let path = Self::config_path().context("Could not determine home directory")?;
        Self::write_template(&path)?;
        Ok(path)
    }

    fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        // Config::default().to_toml() is the single source of truth
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load file config if it exists.
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        toml::from_str(contents).context("Failed to parse TOML")
    }

    /// Load configuration: env > file > defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment lookups over the defaults
    pub(crate) fn merge<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Line bound: env > file > default. Unparseable env values are ignored.
        let max_lines = env(ENV_MAX_LINES)
            .and_then(|v| v.trim().parse().ok())
            .or(file.max_lines)
            .unwrap_or(defaults.max_lines);

        // Reserved rows: file > default
        let reserved_rows = file.reserved_rows.unwrap_or(defaults.reserved_rows);

        // Demo mode: env only (runtime flag)
        let demo_mode = env(ENV_DEMO)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        // Logging: file section, then env override for the level
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env(ENV_LOG_LEVEL) {
            logging.level = level;
        }

        Self {
            max_lines,
            reserved_rows,
            demo_mode,
            logging,
        }
    }
}
