//! `[logging]` section
//!
//! Filter level plus the optional JSON log file written through
//! `tracing-appender`. `RUST_LOG` still wins over `level` at startup.

use serde::Deserialize;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file, never rolled
    Never,
}

impl LogRotation {
    /// Name as written in the config file
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Also write JSON lines to `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem; the appender adds the date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "ccforge".to_string(),
        }
    }
}

/// `[logging]` as written in the file. Every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Fill unset keys from the defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let Some(file) = file else {
            return Self::default();
        };
        let base = Self::default();

        Self {
            level: file.level.unwrap_or(base.level),
            file_enabled: file.file_enabled.unwrap_or(base.file_enabled),
            file_dir: file.file_dir.unwrap_or(base.file_dir),
            file_rotation: file.file_rotation.unwrap_or(base.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(base.file_prefix),
        }
    }
}
