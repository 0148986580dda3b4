//! Platform-specific helpers for the files relocate itself owns (config
//! template, log file). Unix gets owner-only modes; Windows keeps defaults.

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
use unix as imp;
#[cfg(not(unix))]
use windows as imp;

pub use imp::{restrict_dir, restrict_file};

use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::fs_ops::{HostFs, LocalFs};
use temp::tmp_config_sibling_name;

/// Open `path` for appending, creating it owner-only when new.
/// An existing file keeps its permissions.
pub fn open_log_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let file = imp::private_options().create(true).append(true).open(path)?;
    if !existed {
        let _ = restrict_file(path);
    }
    Ok(file)
}

/// Write a file that must not exist yet: owner-only temp sibling, fsync,
/// then a no-clobber rename into place.
pub fn write_new_private(path: &Path, contents: &[u8]) -> Result<()> {
    if path.exists() {
        bail!("refusing to overwrite existing file: {}", path.display());
    }
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory: {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create '{}'", parent.display()))?;

    let tmp = tmp_config_sibling_name(path);
    let mut f = imp::private_options()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .with_context(|| format!("create temp '{}'", tmp.display()))?;
    let written = f.write_all(contents).and_then(|_| f.sync_all());
    drop(f);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("write temp '{}'", tmp.display()));
    }

    match LocalFs.rename(&tmp, path) {
        Ok(true) => Ok(()),
        Ok(false) => {
            let _ = fs::remove_file(&tmp);
            bail!("{} appeared while writing; left untouched", path.display())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e).with_context(|| format!("publish '{}'", path.display()))
        }
    }
}
