//! Owner-only modes on Unix.

use std::fs::{self, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open options whose newly created files start at 0600.
pub(super) fn private_options() -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.mode(0o600);
    opts
}

/// chmod 0700.
pub fn restrict_dir(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

/// chmod 0600.
pub fn restrict_file(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}
