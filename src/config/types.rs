//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{EXIFTOOL_CMD_DEFAULT, FALLBACK_CMD_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the renamer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bulk metadata provider command (reads a whole directory at once)
    pub exiftool_cmd: String,
    /// Per-file fallback provider command
    pub fallback_cmd: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print actions but do not modify the filesystem
    pub dry_run: bool,
    /// If true, skip the confirmation prompt (CLI-only; never set from XML)
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exiftool_cmd: EXIFTOOL_CMD_DEFAULT.to_string(),
            fallback_cmd: FALLBACK_CMD_DEFAULT.to_string(),
            log_level: LogLevel::Normal,
            // paths::default_log_path() is best-effort; None keeps stdout-only logging.
            log_file: paths::default_log_path(),
            dry_run: false,
            assume_yes: false,
        }
    }
}
