//! The uniform result record returned by every copy/move operation.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::ResultCode;

/// Outcome of an operation at any recursion depth.
///
/// Immutable once built: `success` is derived from `code` at construction.
/// `destination` is the path actually used, which differs from the requested
/// one after a `rename-dts` rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    success: bool,
    code: ResultCode,
    code_value: u32,
    message: String,
    source: PathBuf,
    destination: PathBuf,
}

impl Outcome {
    pub fn new(
        code: ResultCode,
        message: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            success: code.is_success(),
            code,
            code_value: code.value(),
            message: message.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn success(
        message: impl Into<String>,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self::new(ResultCode::Success, message, source, destination)
    }

    /// Failure with a message built from the code and the offending path.
    pub fn failure(
        code: ResultCode,
        offending: &Path,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        let message = match code {
            ResultCode::Success => format!("completed: '{}'", offending.display()),
            ResultCode::BadOpmode | ResultCode::BadFilemode | ResultCode::BadFldrmode => {
                rejected_option_message(code, &offending.to_string_lossy())
            }
            ResultCode::SrcNotfound => format!("source not found: '{}'", offending.display()),
            ResultCode::DstExists => format!("destination exists: '{}'", offending.display()),
            ResultCode::DstReplaceFailed => {
                format!("could not remove existing destination: '{}'", offending.display())
            }
            ResultCode::DstMkdirFailed => {
                format!("could not create destination folder: '{}'", offending.display())
            }
            ResultCode::Unknown => {
                format!("operation failed for unknown reason: '{}'", offending.display())
            }
        };
        Self::new(code, message, source, destination)
    }

    /// Failure for an option value that did not name a known mode.
    pub fn rejected_option(
        code: ResultCode,
        value: &str,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self::new(code, rejected_option_message(code, value), source, destination)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

fn rejected_option_message(code: ResultCode, value: &str) -> String {
    let what = match code {
        ResultCode::BadOpmode => "operation mode",
        ResultCode::BadFilemode => "file conflict mode",
        ResultCode::BadFldrmode => "folder conflict mode",
        _ => "option",
    };
    format!("invalid {what}: '{value}'")
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
