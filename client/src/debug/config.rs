//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::{get_env_flag, get_env_or};

pub const DEFAULT_LOG_LEVEL: &str = "skyscout=info,warn";
pub const LOG_FILE_NAME: &str = "skyscout.log";

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory holding the rotated log files
    pub log_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset or invalid
    pub log_level: String,
    /// Mirror events to stderr
    pub stderr: bool,
    /// One JSON object per line instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            stderr: false,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("SKYSCOUT_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_LEVEL),
            stderr: get_env_flag("SKYSCOUT_LOG_STDERR"),
            json: get_env_flag("SKYSCOUT_LOG_JSON"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
