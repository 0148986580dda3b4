//! I/O error helpers.
//!
//! Enrich io::Error with the operation, the path and a platform-aware hint,
//! so that messages in outcomes and logs are actionable on their own.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(with_help("create directory", dir))?;

use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn describe(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-filesystem; atomic rename not possible)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process is writing)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found)");
                }
                libc::EEXIST => {
                    msg.push_str(" (already exists)");
                }
                libc::ENOTEMPTY => {
                    msg.push_str(" (directory not empty)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" (not same device; cross-filesystem move)"), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found)"),
                80 | 183 => msg.push_str(" (already exists)"), // ERROR_FILE_EXISTS / ERROR_ALREADY_EXISTS
                112 => msg.push_str(" (insufficient disk space)"), // ERROR_DISK_FULL
                145 => msg.push_str(" (directory not empty)"), // ERROR_DIR_NOT_EMPTY
                206 => msg.push_str(" (filename or path too long)"), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => msg.push_str(" (path not found)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        }
    }

    msg
}

/// Closure for `.map_err(...)` that keeps the ErrorKind and enriches the message.
pub(crate) fn with_help<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe(op, path, &e))
}
