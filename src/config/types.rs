//! Configuration record and verbosity levels.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::options::Overrides;

/// User-facing verbosity. Each step shows one more tracing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    /// Completed actions and warnings.
    #[default]
    Normal,
    /// Adds per-entry decisions.
    Info,
    /// Everything, including primitive calls.
    Debug,
}

impl LogLevel {
    /// Case-insensitive; accepts a few common aliases (`trace`, `verbose`, `none`).
    pub fn parse(s: &str) -> Option<Self> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => LogLevel::Quiet,
            "normal" => LogLevel::Normal,
            "info" | "verbose" | "detailed" => LogLevel::Info,
            "debug" | "trace" => LogLevel::Debug,
            _ => return None,
        };
        Some(level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Most verbose tracing level shown at this setting.
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Quiet => LevelFilter::ERROR,
            LogLevel::Normal => LevelFilter::INFO,
            LogLevel::Info => LevelFilter::DEBUG,
            LogLevel::Debug => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings read from config.xml, later overlaid with CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Copy/move option defaults.
    pub defaults: Overrides,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
}
