//! File resolver.
//! Applies the file-conflict policy to one source file, then copies or moves it.
//! A move tries the atomic rename first and falls back to copy+delete when the
//! rename is declined (e.g. across devices).

use tracing::{debug, info, warn};

use crate::errors::ResultCode;
use crate::location::Location;
use crate::options::{FileMode, OpMode};
use crate::outcome::Outcome;

use super::naming::stamped_file_name;
use super::{Engine, HostFs};

impl<F: HostFs + ?Sized> Engine<'_, F> {
    /// `src` must exist and be a file.
    pub(crate) fn resolve_file(&self, src: &Location, dst: &Location) -> Outcome {
        let mut dst = dst.clone();

        if dst.exists(self.fs) {
            match self.opts.file_mode() {
                FileMode::Abort => {
                    debug!(src = %src, dst = %dst, "file exists; aborting");
                    return Outcome::failure(ResultCode::DstExists, dst.as_path(), src.as_path(), dst.as_path());
                }
                FileMode::Skip => {
                    info!(src = %src, dst = %dst, "file exists; skipped");
                    return Outcome::success(
                        format!("skipped '{}': destination file exists", src),
                        src.as_path(),
                        dst.as_path(),
                    );
                }
                FileMode::RenameDts => {
                    let Some(name) = dst.name() else {
                        return Outcome::failure(ResultCode::Unknown, dst.as_path(), src.as_path(), dst.as_path());
                    };
                    let renamed = dst.with_name(&stamped_file_name(name, self.opts.stamp()));
                    debug!(dst = %dst, renamed = %renamed, "file exists; using stamped name");
                    dst = renamed;
                }
                FileMode::Replace => {
                    if let Err(e) = self.fs.delete(dst.as_path()) {
                        warn!(dst = %dst, error = %e, "delete of existing file failed");
                    }
                    if dst.exists(self.fs) {
                        return Outcome::failure(
                            ResultCode::DstReplaceFailed,
                            dst.as_path(),
                            src.as_path(),
                            dst.as_path(),
                        );
                    }
                    debug!(dst = %dst, "removed existing file for replace");
                }
            }
        }

        match self.opts.op_mode() {
            OpMode::Copy => self.copy_file(src, &dst),
            OpMode::Move => self.move_file(src, &dst),
        }
    }

    fn copy_file(&self, src: &Location, dst: &Location) -> Outcome {
        let (Some(parent), Some(name)) = (dst.parent(), dst.name()) else {
            return Outcome::failure(ResultCode::Unknown, dst.as_path(), src.as_path(), dst.as_path());
        };

        match self.fs.copy_file(src.as_path(), parent.as_path(), name, false) {
            Ok(true) => {
                info!(src = %src, dst = %dst, "copied file");
                Outcome::success(
                    format!("copied '{}' to '{}'", src, dst),
                    src.as_path(),
                    dst.as_path(),
                )
            }
            Ok(false) => {
                warn!(src = %src, dst = %dst, "copy declined by host");
                Outcome::failure(ResultCode::Unknown, dst.as_path(), src.as_path(), dst.as_path())
            }
            Err(e) => {
                warn!(src = %src, dst = %dst, error = %e, "copy failed");
                Outcome::new(
                    ResultCode::Unknown,
                    format!("copy of '{}' failed for unknown reason: {}", src, e),
                    src.as_path(),
                    dst.as_path(),
                )
            }
        }
    }

    fn move_file(&self, src: &Location, dst: &Location) -> Outcome {
        match self.fs.rename(src.as_path(), dst.as_path()) {
            Ok(true) => {
                info!(src = %src, dst = %dst, "renamed file atomically");
                return Outcome::success(
                    format!("moved '{}' to '{}'", src, dst),
                    src.as_path(),
                    dst.as_path(),
                );
            }
            Ok(false) => debug!(src = %src, dst = %dst, "rename declined; copying instead"),
            Err(e) => warn!(src = %src, dst = %dst, error = %e, "rename failed; copying instead"),
        }

        let copied = self.copy_file(src, dst);
        if !copied.is_success() {
            return copied;
        }

        if let Err(e) = self.fs.delete(src.as_path()) {
            warn!(src = %src, error = %e, "could not remove source after copy");
        }
        if src.exists(self.fs) {
            return Outcome::success(
                format!("moved '{}' to '{}' (source file could not be removed)", src, dst),
                src.as_path(),
                dst.as_path(),
            );
        }
        Outcome::success(
            format!("moved '{}' to '{}'", src, dst),
            src.as_path(),
            dst.as_path(),
        )
    }
}
