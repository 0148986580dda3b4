//! Operation options.
//! - Mode enums with string parsing (the closed enumerations callers may name).
//! - `Overrides`: caller-supplied partial options, modes still as raw strings.
//! - `Options`: the fully resolved, read-only record for one top-level call.

use std::fmt;
use std::str::FromStr;

use crate::errors::ResultCode;

/// Default folder recursion bound.
pub const MAX_DEPTH_DEFAULT: usize = 256;

/// Copy or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Copy,
    Move,
}

/// Policy for an existing destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Fail with `DST_EXISTS`.
    #[default]
    Abort,
    /// Leave both sides untouched and report success.
    Skip,
    /// Write to `<stem>_<timestamp>.<ext>` next to the existing file.
    RenameDts,
    /// Delete the existing file first.
    Replace,
}

/// Policy for an existing destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderMode {
    /// Fail with `DST_EXISTS`.
    #[default]
    Abort,
    /// Leave both sides untouched and report success.
    Skip,
    /// Write to `<name>_<timestamp>` next to the existing folder.
    RenameDts,
    /// Recursively delete the existing folder first.
    Replace,
    /// Copy/move children into the existing folder.
    Merge,
}

impl OpMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OpMode::Copy => "copy",
            OpMode::Move => "move",
        }
    }
}

impl FileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Abort => "abort",
            FileMode::Skip => "skip",
            FileMode::RenameDts => "rename-dts",
            FileMode::Replace => "replace",
        }
    }
}

impl FolderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FolderMode::Abort => "abort",
            FolderMode::Skip => "skip",
            FolderMode::RenameDts => "rename-dts",
            FolderMode::Replace => "replace",
            FolderMode::Merge => "merge",
        }
    }
}

// Mode names are matched exactly: callers pass the documented spellings.
impl FromStr for OpMode {
    type Err = ResultCode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(OpMode::Copy),
            "move" => Ok(OpMode::Move),
            _ => Err(ResultCode::BadOpmode),
        }
    }
}

impl FromStr for FileMode {
    type Err = ResultCode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FileMode::Abort),
            "skip" => Ok(FileMode::Skip),
            "rename-dts" => Ok(FileMode::RenameDts),
            "replace" => Ok(FileMode::Replace),
            _ => Err(ResultCode::BadFilemode),
        }
    }
}

impl FromStr for FolderMode {
    type Err = ResultCode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FolderMode::Abort),
            "skip" => Ok(FolderMode::Skip),
            "rename-dts" => Ok(FolderMode::RenameDts),
            "replace" => Ok(FolderMode::Replace),
            "merge" => Ok(FolderMode::Merge),
            _ => Err(ResultCode::BadFldrmode),
        }
    }
}

impl fmt::Display for OpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FolderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied options. Unset fields fall back to the defaults
/// (`recursive=true`, `file_mode=abort`, `folder_mode=abort`).
///
/// Modes are kept as raw strings so that an unrecognized value reaches the
/// dispatcher and is reported as `BAD_FILEMODE` / `BAD_FLDRMODE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub file_mode: Option<String>,
    pub folder_mode: Option<String>,
    pub recursive: Option<bool>,
    pub max_depth: Option<usize>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_mode(mut self, mode: impl fmt::Display) -> Self {
        self.file_mode = Some(mode.to_string());
        self
    }

    pub fn folder_mode(mut self, mode: impl fmt::Display) -> Self {
        self.folder_mode = Some(mode.to_string());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = Some(recursive);
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Fill fields left unset here from `fallback` (e.g. config file values).
    pub fn or(self, fallback: &Overrides) -> Self {
        Self {
            file_mode: self.file_mode.or_else(|| fallback.file_mode.clone()),
            folder_mode: self.folder_mode.or_else(|| fallback.folder_mode.clone()),
            recursive: self.recursive.or(fallback.recursive),
            max_depth: self.max_depth.or(fallback.max_depth),
        }
    }
}

/// Fully resolved options for one top-level call. Read-only once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    op_mode: OpMode,
    file_mode: FileMode,
    folder_mode: FolderMode,
    recursive: bool,
    max_depth: usize,
    stamp: i64,
}

impl Options {
    /// Merge `overrides` over the defaults and validate every mode.
    ///
    /// Checks run in the order operation mode, file mode, folder mode; the
    /// first invalid one decides the returned code. `stamp` is the run-scoped
    /// timestamp token (milliseconds since the epoch).
    pub fn resolve(op_mode: &str, overrides: &Overrides, stamp: i64) -> Result<Self, ResultCode> {
        let op_mode = op_mode.parse::<OpMode>()?;
        let file_mode = match overrides.file_mode.as_deref() {
            Some(s) => s.parse::<FileMode>()?,
            None => FileMode::default(),
        };
        let folder_mode = match overrides.folder_mode.as_deref() {
            Some(s) => s.parse::<FolderMode>()?,
            None => FolderMode::default(),
        };
        Ok(Self {
            op_mode,
            file_mode,
            folder_mode,
            recursive: overrides.recursive.unwrap_or(true),
            max_depth: overrides.max_depth.unwrap_or(MAX_DEPTH_DEFAULT),
            stamp,
        })
    }

    pub fn op_mode(&self) -> OpMode {
        self.op_mode
    }

    pub fn file_mode(&self) -> FileMode {
        self.file_mode
    }

    pub fn folder_mode(&self) -> FolderMode {
        self.folder_mode
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Timestamp token shared by every rename-dts decision of this run.
    pub fn stamp(&self) -> i64 {
        self.stamp
    }
}
