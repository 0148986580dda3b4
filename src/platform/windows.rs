//! Windows has no POSIX modes; files keep the inherited ACLs.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

pub(super) fn private_options() -> OpenOptions {
    OpenOptions::new()
}

pub fn restrict_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

pub fn restrict_file(_path: &Path) -> io::Result<()> {
    Ok(())
}
