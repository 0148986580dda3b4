//! Copy/move engine: host primitives plus the file and folder resolvers.

mod atomic;
mod copy;
mod entry;
mod file;
mod folder;
mod helpers;
mod host;
mod naming;
mod util;

pub use entry::{copy_entry, copy_entry_with, move_entry, move_entry_with, resolve_entry};
pub use host::{HostFs, LocalFs};
pub use naming::{stamped_dir_name, stamped_file_name};

use crate::options::Options;

/// One top-level call's view of the world: the primitives and the resolved
/// options, both borrowed read-only for the whole recursion.
pub(crate) struct Engine<'a, F: HostFs + ?Sized> {
    fs: &'a F,
    opts: &'a Options,
}

impl<'a, F: HostFs + ?Sized> Engine<'a, F> {
    pub(crate) fn new(fs: &'a F, opts: &'a Options) -> Self {
        Self { fs, opts }
    }
}
