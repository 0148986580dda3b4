//! Path values used by the engine.
//! A `Location` is an absolute, normalized path. Every location, whether it
//! comes from the caller, a directory listing or a rename-dts rewrite, is
//! built through `Location::from_path`, so normalization happens in one place.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::fs_ops::HostFs;

/// Immutable filesystem location. "Renaming" yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: PathBuf,
}

impl Location {
    /// Build from caller input. `"/data/foo/"` and `"/data/foo"` are equal.
    pub fn parse(raw: &str) -> Self {
        Self::from_path(Path::new(raw))
    }

    /// Build from any path; trailing separators and `.` components are dropped
    /// and relative paths are anchored at the current directory.
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: normalize(path),
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Leaf name, `None` for a root.
    pub fn name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    pub fn parent(&self) -> Option<Location> {
        self.path.parent().map(Location::from_path)
    }

    /// `self/<name>`.
    pub fn child(&self, name: &OsStr) -> Location {
        Location::from_path(&self.path.join(name))
    }

    /// Sibling location with a different leaf name.
    pub fn with_name(&self, name: &OsStr) -> Location {
        Location::from_path(&self.path.with_file_name(name))
    }

    pub fn exists<F: HostFs + ?Sized>(&self, fs: &F) -> bool {
        fs.exists(&self.path)
    }

    pub fn is_file<F: HostFs + ?Sized>(&self, fs: &F) -> bool {
        fs.is_file(&self.path)
    }

    pub fn is_dir<F: HostFs + ?Sized>(&self, fs: &F) -> bool {
        fs.is_dir(&self.path)
    }

    /// Immediate children as locations, in listing order.
    pub fn children<F: HostFs + ?Sized>(&self, fs: &F) -> std::io::Result<Vec<Location>> {
        Ok(fs
            .children(&self.path)?
            .iter()
            .map(|p| Location::from_path(p))
            .collect())
    }
}

impl AsRef<Path> for Location {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

fn normalize(path: &Path) -> PathBuf {
    // Rebuilding from components drops trailing separators and `.` segments.
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        if path.as_os_str().is_empty() {
            return PathBuf::new();
        }
        // Input was only `.` segments.
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }
    let absolute = std::path::absolute(&cleaned).unwrap_or(cleaned);
    dunce::simplified(&absolute).to_path_buf()
}
