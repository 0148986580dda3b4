//! Host filesystem primitives the engine orchestrates.
//!
//! `Ok(false)` from a primitive means "declined without a structured error"
//! (destination taken, different device, ...); `Err` carries the I/O detail.
//! The engine classifies both as `UNKNOWN` where it cannot do better.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename;
use super::helpers::with_help;

/// Filesystem operations supplied by the embedding environment.
pub trait HostFs {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of a directory, in listing order.
    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create `path` and any missing ancestors; fine if it already exists.
    fn mkdirs(&self, path: &Path) -> io::Result<()>;

    /// Delete a single file or an empty directory.
    fn delete(&self, path: &Path) -> io::Result<bool>;

    /// Delete a directory and everything below it.
    fn delete_recursive(&self, path: &Path) -> io::Result<bool>;

    /// Atomically move `src` to `dst`. Declines rather than errors when the
    /// two sit on incompatible storage.
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<bool>;

    /// Copy the single file `src` to `dst_dir/name`.
    fn copy_file(&self, src: &Path, dst_dir: &Path, name: &OsStr, overwrite: bool)
    -> io::Result<bool>;
}

/// `HostFs` over the local filesystem (`std::fs`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl HostFs for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .map(|entry| {
                entry
                    .map(walkdir::DirEntry::into_path)
                    .map_err(|e| with_help("list directory", path)(io::Error::from(e)))
            })
            .collect()
    }

    fn mkdirs(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).map_err(with_help("create directory", path))
    }

    fn delete(&self, path: &Path) -> io::Result<bool> {
        let meta = fs::symlink_metadata(path).map_err(with_help("stat", path))?;
        if meta.is_dir() {
            fs::remove_dir(path).map_err(with_help("remove directory", path))?;
        } else {
            fs::remove_file(path).map_err(with_help("remove file", path))?;
        }
        Ok(true)
    }

    fn delete_recursive(&self, path: &Path) -> io::Result<bool> {
        let meta = fs::symlink_metadata(path).map_err(with_help("stat", path))?;
        if meta.is_dir() {
            fs::remove_dir_all(path).map_err(with_help("remove directory tree", path))?;
        } else {
            fs::remove_file(path).map_err(with_help("remove file", path))?;
        }
        Ok(true)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<bool> {
        try_atomic_move(src, dst)
    }

    fn copy_file(
        &self,
        src: &Path,
        dst_dir: &Path,
        name: &OsStr,
        overwrite: bool,
    ) -> io::Result<bool> {
        safe_copy_and_rename(src, &dst_dir.join(name), overwrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn children_lists_one_level_only() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("a/deep")).unwrap();
        fs::write(td.path().join("f.txt"), "x").unwrap();
        fs::write(td.path().join("a/deep/g.txt"), "y").unwrap();

        let mut names: Vec<_> = LocalFs
            .children(td.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "f.txt"]);
    }

    #[test]
    fn children_of_missing_dir_errors() {
        let td = tempdir().unwrap();
        assert!(LocalFs.children(&td.path().join("missing")).is_err());
    }

    #[test]
    fn delete_refuses_non_empty_directory() {
        let td = tempdir().unwrap();
        let d = td.path().join("d");
        fs::create_dir(&d).unwrap();
        fs::write(d.join("x"), "x").unwrap();
        assert!(LocalFs.delete(&d).is_err());
        assert!(d.exists());
        assert!(LocalFs.delete_recursive(&d).unwrap());
        assert!(!d.exists());
    }

    #[test]
    fn mkdirs_is_idempotent() {
        let td = tempdir().unwrap();
        let d = td.path().join("a/b/c");
        LocalFs.mkdirs(&d).unwrap();
        LocalFs.mkdirs(&d).unwrap();
        assert!(d.is_dir());
    }
}
