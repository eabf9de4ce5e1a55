//! Logging configuration from environment variables

use std::path::PathBuf;

const DEFAULT_FILTER: &str = "chess_terminal=info,warn";
const LOG_FILE: &str = "chess-terminal.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DebugConfig {
    /// Log directory (daily rotation happens inside it)
    pub log_dir: PathBuf,
    /// File name prefix for the rotated logs
    pub log_file: String,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: LOG_FILE.to_string(),
            log_level: DEFAULT_FILTER.to_string(),
        }
    }
}

impl DebugConfig {
    /// Load configuration from `CHESS_LOG_DIR` and `RUST_LOG`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("CHESS_LOG_DIR").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(log_dir: Option<String>, log_level: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: log_dir
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file: defaults.log_file,
            log_level: log_level
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
