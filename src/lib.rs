//! Core library for `relocate`.
//!
//! Copies or moves a file or folder under explicit conflict policies and
//! reports every run as one [`Outcome`]:
//! - `file_mode` decides what happens to an existing destination file
//!   (`abort`, `skip`, `rename-dts`, `replace`);
//! - `folder_mode` does the same for folders and adds `merge`;
//! - moves use one atomic rename when possible and fall back to
//!   copy-then-delete across devices or when merging.
//!
//! ```no_run
//! use relocate::{Overrides, copy_entry};
//!
//! let outcome = copy_entry("/data/in", "/data/out", &Overrides::new().folder_mode("merge"));
//! if !outcome.is_success() {
//!     eprintln!("{outcome}");
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod location;
pub mod options;
pub mod outcome;
pub mod output;
pub mod platform;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::{RelocateError, ResultCode};
pub use fs_ops::{
    HostFs, LocalFs, copy_entry, copy_entry_with, move_entry, move_entry_with, resolve_entry,
};
pub use location::Location;
pub use options::{FileMode, FolderMode, OpMode, Options, Overrides};
pub use outcome::Outcome;

/// Convenience re-exports for callers embedding the engine.
pub mod prelude {
    pub use crate::errors::{RelocateError, ResultCode};
    pub use crate::fs_ops::{
        HostFs, LocalFs, copy_entry, copy_entry_with, move_entry, move_entry_with,
    };
    pub use crate::options::{FileMode, FolderMode, Overrides};
    pub use crate::outcome::Outcome;
}
