//! CLI definition and parsing.
//!
//! Notes:
//! - Conflict modes are taken as plain strings so that an unknown value is
//!   reported by the engine as BAD_FILEMODE / BAD_FLDRMODE, not by clap.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::options::Overrides;

/// Copy or move files and folders with explicit conflict policies.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy or move files and folders with explicit conflict policies"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs and the result record as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy SOURCE to DESTINATION.
    Copy(TransferArgs),
    /// Move SOURCE to DESTINATION.
    Move(TransferArgs),
    /// Show the config file location, or write a template with --init.
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct TransferArgs {
    /// File or folder to copy/move.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::AnyPath)]
    pub source: String,

    /// Full destination path (not the parent folder).
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::AnyPath)]
    pub destination: String,

    /// Existing destination file: abort, skip, rename-dts, replace.
    #[arg(long, value_name = "MODE")]
    pub file_mode: Option<String>,

    /// Existing destination folder: abort, skip, rename-dts, replace, merge.
    #[arg(long, value_name = "MODE")]
    pub folder_mode: Option<String>,

    /// Do not descend into subfolders when walking a folder.
    #[arg(long)]
    pub no_recursive: bool,

    /// Deepest folder level the walk may reach.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Write a template config file at the resolved location.
    #[arg(long)]
    pub init: bool,
}

impl TransferArgs {
    /// Options given on the command line; unset flags stay `None`.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            file_mode: self.file_mode.clone(),
            folder_mode: self.folder_mode.clone(),
            recursive: self.no_recursive.then_some(false),
            max_depth: self.max_depth,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if let Command::Copy(t) | Command::Move(t) = &self.command {
            cfg.defaults = t.overrides().or(&cfg.defaults);
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
