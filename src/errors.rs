//! Result-code taxonomy and typed setup errors for relocate.
//!
//! Engine failures are never raised: they are classified by a [`ResultCode`]
//! carried inside an [`crate::Outcome`]. [`RelocateError`] covers the setup
//! stage around the engine (config files, logging, templates).

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Closed set of terminal classifications for any copy/move operation.
///
/// Values are distinct bits so callers can build masks of codes they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ResultCode {
    /// Completed, including skip and merge no-ops.
    Success = 0,
    /// Operation mode was not `copy` or `move`.
    BadOpmode = 1,
    /// File-conflict mode was not recognized.
    BadFilemode = 2,
    /// Folder-conflict mode was not recognized.
    BadFldrmode = 4,
    /// Source did not exist at dispatch time.
    SrcNotfound = 8,
    /// Destination exists and the policy is `abort`.
    DstExists = 16,
    /// Deleting the existing destination did not remove it.
    DstReplaceFailed = 32,
    /// Creating the destination directory did not produce it.
    DstMkdirFailed = 64,
    /// A copy/rename primitive failed without a finer classification.
    Unknown = 128,
}

impl ResultCode {
    /// Numeric value of the code.
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Stable uppercase name (used in logs and JSON output).
    pub fn name(self) -> &'static str {
        match self {
            ResultCode::Success => "SUCCESS",
            ResultCode::BadOpmode => "BAD_OPMODE",
            ResultCode::BadFilemode => "BAD_FILEMODE",
            ResultCode::BadFldrmode => "BAD_FLDRMODE",
            ResultCode::SrcNotfound => "SRC_NOTFOUND",
            ResultCode::DstExists => "DST_EXISTS",
            ResultCode::DstReplaceFailed => "DST_REPLACE_FAILED",
            ResultCode::DstMkdirFailed => "DST_MKDIR_FAILED",
            ResultCode::Unknown => "UNKNOWN",
        }
    }

    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures outside the engine: configuration and process setup.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Refusing to use {0}: an ancestor directory is a symlink")]
    SymlinkAncestor(PathBuf),

    #[error("Could not determine a default config location")]
    NoConfigDir,
}

impl RelocateError {
    /// Stable small integer for structured logs.
    pub fn code(&self) -> i32 {
        match self {
            RelocateError::ConfigNotFound(_) => 2,
            RelocateError::ConfigInvalid { .. } => 3,
            RelocateError::SymlinkAncestor(_) => 4,
            RelocateError::NoConfigDir => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILURES: [ResultCode; 8] = [
        ResultCode::BadOpmode,
        ResultCode::BadFilemode,
        ResultCode::BadFldrmode,
        ResultCode::SrcNotfound,
        ResultCode::DstExists,
        ResultCode::DstReplaceFailed,
        ResultCode::DstMkdirFailed,
        ResultCode::Unknown,
    ];

    #[test]
    fn codes_are_distinct_bits() {
        let mut seen = 0u32;
        for code in FAILURES {
            let v = code.value();
            assert_eq!(v.count_ones(), 1, "{code} is not a single bit");
            assert_eq!(seen & v, 0, "{code} overlaps another code");
            seen |= v;
        }
        assert_eq!(ResultCode::Success.value(), 0);
    }

    #[test]
    fn names_match_display() {
        assert_eq!(ResultCode::DstExists.value(), 16);
        assert_eq!(ResultCode::Unknown.name(), "UNKNOWN");
        assert_eq!(ResultCode::DstMkdirFailed.to_string(), "DST_MKDIR_FAILED");
    }

    #[test]
    fn serializes_as_screaming_snake() {
        let s = serde_json::to_string(&ResultCode::DstReplaceFailed).unwrap();
        assert_eq!(s, "\"DST_REPLACE_FAILED\"");
        let s = serde_json::to_string(&ResultCode::BadFldrmode).unwrap();
        assert_eq!(s, "\"BAD_FLDRMODE\"");
    }
}
