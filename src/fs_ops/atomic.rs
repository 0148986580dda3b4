//! No-clobber atomic rename.
//! - Refuses (`Ok(false)`) when the destination already exists, on every platform.
//! - Refuses (`Ok(false)`) when source and destination are on different devices.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::helpers::with_help;
use super::util::{fsync_dir, is_cross_device};

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<bool> {
    if dst.exists() {
        debug!(src = %src.display(), dst = %dst.display(), "rename refused: destination exists");
        return Ok(false);
    }

    match fs::rename(src, dst) {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dst = %dst.display(), "rename refused: cross-device");
            return Ok(false);
        }
        Err(e) => return Err(with_help("rename", src)(e)),
    }

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    if let Some(parent) = dst.parent() {
        let _ = fsync_dir(parent);
    }
    Ok(true)
}
