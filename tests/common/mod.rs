#![allow(dead_code)]

use std::cell::Cell;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use relocate::{HostFs, LocalFs};

/// LocalFs wrapper that counts mutating calls. It can refuse renames to
/// mimic a cross-device boundary, decline recursive deletes, and list
/// children in name order.
#[derive(Default)]
pub struct CountingFs {
    pub deny_rename: bool,
    pub decline_delete_recursive: bool,
    pub sorted_children: bool,
    pub renames: Cell<usize>,
    pub copies: Cell<usize>,
    pub deletes: Cell<usize>,
    pub mkdirs: Cell<usize>,
}

impl CountingFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying_rename() -> Self {
        Self {
            deny_rename: true,
            ..Self::default()
        }
    }

    pub fn declining_delete_recursive() -> Self {
        Self {
            decline_delete_recursive: true,
            ..Self::default()
        }
    }

    pub fn sorted() -> Self {
        Self {
            sorted_children: true,
            ..Self::default()
        }
    }

    pub fn mutations(&self) -> usize {
        self.renames.get() + self.copies.get() + self.deletes.get() + self.mkdirs.get()
    }
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

impl HostFs for CountingFs {
    fn exists(&self, path: &Path) -> bool {
        LocalFs.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        LocalFs.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        LocalFs.is_dir(path)
    }

    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut listed = LocalFs.children(path)?;
        if self.sorted_children {
            listed.sort();
        }
        Ok(listed)
    }

    fn mkdirs(&self, path: &Path) -> io::Result<()> {
        bump(&self.mkdirs);
        LocalFs.mkdirs(path)
    }

    fn delete(&self, path: &Path) -> io::Result<bool> {
        bump(&self.deletes);
        LocalFs.delete(path)
    }

    fn delete_recursive(&self, path: &Path) -> io::Result<bool> {
        bump(&self.deletes);
        if self.decline_delete_recursive {
            return Ok(false);
        }
        LocalFs.delete_recursive(path)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<bool> {
        bump(&self.renames);
        if self.deny_rename {
            return Ok(false);
        }
        LocalFs.rename(src, dst)
    }

    fn copy_file(&self, src: &Path, dst_dir: &Path, name: &OsStr, overwrite: bool) -> io::Result<bool> {
        bump(&self.copies);
        LocalFs.copy_file(src, dst_dir, name, overwrite)
    }
}

/// Canonical temp base so symlinked tmp dirs (macOS) do not skew paths.
pub fn base(td: &tempfile::TempDir) -> PathBuf {
    fs::canonicalize(td.path()).expect("canonicalize tempdir")
}

pub fn s(p: &Path) -> &str {
    p.to_str().expect("utf-8 temp path")
}

/// Names directly inside `dir`, sorted.
pub fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}
