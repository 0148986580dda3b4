//! Default path helpers and symlink checks.
//! Determines the config/log locations and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::RelocateError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "RELOCATE_CONFIG";

/// Config path: `$RELOCATE_CONFIG` when set, else `<config_dir>/relocate/config.xml`.
pub fn default_config_path() -> Result<PathBuf, RelocateError> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(base) = config_dir() {
        return Ok(base.join("relocate").join("config.xml"));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join("relocate").join("config.xml"))
        .ok_or(RelocateError::NoConfigDir)
}

/// Log path: next to an explicit `$RELOCATE_CONFIG`, else `<data_dir>/relocate/relocate.log`.
pub fn default_log_path() -> Result<PathBuf, RelocateError> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let cfg = PathBuf::from(p);
        let dir = cfg.parent().map(Path::to_path_buf).unwrap_or_default();
        return Ok(dir.join("relocate.log"));
    }
    if let Some(base) = data_dir() {
        return Ok(base.join("relocate").join("relocate.log"));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("relocate")
                .join("relocate.log")
        })
        .ok_or(RelocateError::NoConfigDir)
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_tree_has_no_symlink_ancestor() {
        let td = tempdir().unwrap();
        let p = td.path().join("a/b/c.log");
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        // The tempdir itself may live under a symlinked /tmp on some systems.
        let real = fs::canonicalize(td.path()).unwrap().join("a/b/c.log");
        assert!(!path_has_symlink_ancestor(&real).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_parent_is_detected() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        fs::create_dir(base.join("real")).unwrap();
        std::os::unix::fs::symlink(base.join("real"), base.join("link")).unwrap();
        assert!(path_has_symlink_ancestor(&base.join("link/file.log")).unwrap());
    }
}
