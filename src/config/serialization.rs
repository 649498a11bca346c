//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render this config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# ccforge configuration
#
# Precedence: command-line flags > environment > this file > defaults
# Environment: CCFORGE_MAX_LINES, CCFORGE_DEMO, CCFORGE_LOG_LEVEL

# Maximum transcript lines kept in memory (0 = unbounded).
# Oldest lines are dropped first.
max_lines = {max_lines}

# Rows of the output pane kept free of transcript lines
reserved_rows = {reserved_rows}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the in-memory buffer)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            max_lines = self.max_lines,
            reserved_rows = self.reserved_rows,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
