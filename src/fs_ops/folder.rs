//! Folder resolver.
//! Applies the folder-conflict policy, tries a whole-tree rename for moves,
//! and otherwise walks the immediate children (recursing into subfolders)
//! before removing the emptied source on a move.

use tracing::{debug, info, warn};

use crate::errors::ResultCode;
use crate::location::Location;
use crate::options::{FolderMode, OpMode};
use crate::outcome::Outcome;

use super::naming::stamped_dir_name;
use super::{Engine, HostFs};

impl<F: HostFs + ?Sized> Engine<'_, F> {
    /// `src` must exist and be a directory. `depth` is 0 for the top-level folder.
    pub(crate) fn resolve_folder(&self, src: &Location, dst: &Location, depth: usize) -> Outcome {
        if depth > self.opts.max_depth() {
            warn!(src = %src, depth, "maximum folder depth exceeded");
            return Outcome::new(
                ResultCode::Unknown,
                format!(
                    "maximum folder depth ({}) exceeded at '{}'",
                    self.opts.max_depth(),
                    src
                ),
                src.as_path(),
                dst.as_path(),
            );
        }

        let mut dst = dst.clone();

        if dst.exists(self.fs) {
            match self.opts.folder_mode() {
                FolderMode::Abort => {
                    debug!(src = %src, dst = %dst, "folder exists; aborting");
                    return Outcome::failure(ResultCode::DstExists, dst.as_path(), src.as_path(), dst.as_path());
                }
                FolderMode::Skip => {
                    info!(src = %src, dst = %dst, "folder exists; skipped");
                    return Outcome::success(
                        format!("skipped '{}': destination folder exists", src),
                        src.as_path(),
                        dst.as_path(),
                    );
                }
                FolderMode::RenameDts => {
                    let Some(name) = dst.name() else {
                        return Outcome::failure(ResultCode::Unknown, dst.as_path(), src.as_path(), dst.as_path());
                    };
                    let renamed = dst.with_name(&stamped_dir_name(name, self.opts.stamp()));
                    debug!(dst = %dst, renamed = %renamed, "folder exists; using stamped name");
                    dst = renamed;
                }
                FolderMode::Replace => {
                    if let Err(e) = self.fs.delete_recursive(dst.as_path()) {
                        warn!(dst = %dst, error = %e, "recursive delete of existing folder failed");
                    }
                    if dst.exists(self.fs) {
                        return Outcome::failure(
                            ResultCode::DstReplaceFailed,
                            dst.as_path(),
                            src.as_path(),
                            dst.as_path(),
                        );
                    }
                    debug!(dst = %dst, "removed existing folder for replace");
                }
                FolderMode::Merge => {
                    debug!(src = %src, dst = %dst, "folder exists; merging");
                }
            }
        }

        if self.opts.op_mode() == OpMode::Move && self.try_rename_folder(src, &dst) {
            return Outcome::success(
                format!("moved '{}' to '{}'", src, dst),
                src.as_path(),
                dst.as_path(),
            );
        }

        if let Err(e) = self.fs.mkdirs(dst.as_path()) {
            warn!(dst = %dst, error = %e, "create destination folder failed");
        }
        if !dst.is_dir(self.fs) {
            return Outcome::failure(ResultCode::DstMkdirFailed, dst.as_path(), src.as_path(), dst.as_path());
        }

        let children = match src.children(self.fs) {
            Ok(children) => children,
            Err(e) => {
                warn!(src = %src, error = %e, "listing folder failed");
                return Outcome::new(
                    ResultCode::Unknown,
                    format!("listing '{}' failed for unknown reason: {}", src, e),
                    src.as_path(),
                    dst.as_path(),
                );
            }
        };

        for child in &children {
            let Some(name) = child.name() else {
                continue;
            };
            let target = dst.child(name);

            let outcome = if child.is_file(self.fs) {
                self.resolve_file(child, &target)
            } else if child.is_dir(self.fs) {
                if !self.opts.recursive() {
                    debug!(child = %child, "not recursive; leaving subfolder");
                    continue;
                }
                self.resolve_folder(child, &target, depth + 1)
            } else {
                debug!(child = %child, "neither file nor folder; skipped");
                continue;
            };

            if !outcome.is_success() {
                return outcome;
            }
        }

        match self.opts.op_mode() {
            OpMode::Copy => {
                info!(src = %src, dst = %dst, entries = children.len(), "copied folder");
                Outcome::success(
                    format!("copied '{}' to '{}'", src, dst),
                    src.as_path(),
                    dst.as_path(),
                )
            }
            OpMode::Move => self.finish_folder_move(src, &dst),
        }
    }

    /// Whole-tree rename. Counts only when the source is gone and the
    /// destination is present afterwards.
    fn try_rename_folder(&self, src: &Location, dst: &Location) -> bool {
        match self.fs.rename(src.as_path(), dst.as_path()) {
            Ok(true) => {
                if !src.exists(self.fs) && dst.exists(self.fs) {
                    info!(src = %src, dst = %dst, "renamed folder atomically");
                    return true;
                }
                warn!(src = %src, dst = %dst, "rename reported success but paths disagree; copying instead");
            }
            Ok(false) => debug!(src = %src, dst = %dst, "folder rename declined; copying instead"),
            Err(e) => warn!(src = %src, dst = %dst, error = %e, "folder rename failed; copying instead"),
        }
        false
    }

    /// Every child is in place; remove the source folder. A source that
    /// cannot be removed still counts as a completed move.
    fn finish_folder_move(&self, src: &Location, dst: &Location) -> Outcome {
        if let Err(e) = self.fs.delete(src.as_path()) {
            warn!(src = %src, error = %e, "could not remove source folder after copy");
        }
        if src.exists(self.fs) {
            warn!(src = %src, dst = %dst, "source folder left behind");
            return Outcome::success(
                format!("moved '{}' to '{}' (source folder could not be removed)", src, dst),
                src.as_path(),
                dst.as_path(),
            );
        }
        info!(src = %src, dst = %dst, "moved folder by copy");
        Outcome::success(
            format!("moved '{}' to '{}'", src, dst),
            src.as_path(),
            dst.as_path(),
        )
    }
}
