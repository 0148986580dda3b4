//! Single-file copy helper:
//! - Copies to a hidden temp file in the destination directory
//! - Renames temp -> dest without clobbering
//! - Removes the temp file on any failure

use std::fs;
use std::io;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::with_help;
use super::util::unique_temp_path;

/// Copy `src` to `dest` through a temp sibling. `Ok(false)` when `dest`
/// exists and `overwrite` is not set, or when the final rename is refused.
pub(super) fn safe_copy_and_rename(src: &Path, dest: &Path, overwrite: bool) -> io::Result<bool> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no parent: {}", dest.display()),
        )
    })?;

    if dest.exists() {
        if !overwrite {
            return Ok(false);
        }
        fs::remove_file(dest).map_err(with_help("remove existing destination", dest))?;
    }

    let tmp_path = unique_temp_path(dest_dir);
    if let Err(e) = fs::copy(src, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(with_help("copy to temporary file", &tmp_path)(e));
    }

    match try_atomic_move(&tmp_path, dest) {
        Ok(true) => Ok(true),
        other => {
            let _ = fs::remove_file(&tmp_path);
            other
        }
    }
}
