//! rename-dts name construction.
//!
//! Files:   "<stem>_<stamp>.<ext>", splitting on the last dot.
//! Folders: "<name>_<stamp>", never extension-aware.
//!
//! A name without an extension uses the whole name as the stem, so
//! "README" -> "README_<stamp>" and ".env" -> ".env_<stamp>". Generated names
//! are shortened on the stem side to fit the platform filename limit.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// rename-dts name for a file.
///
/// Examples:
/// - "movie.mkv" -> "movie_1700000000000.mkv"
/// - "archive.tar.gz" -> "archive.tar_1700000000000.gz"
pub fn stamped_file_name(name: &OsStr, stamp: i64) -> OsString {
    let base = Path::new(name);
    let stem = base.file_stem().unwrap_or(name);
    let ext = base.extension();
    build_name_with_suffix(stem, ext, &format!("_{stamp}"))
}

/// rename-dts name for a folder.
pub fn stamped_dir_name(name: &OsStr, stamp: i64) -> OsString {
    build_name_with_suffix(name, None, &format!("_{stamp}"))
}

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240;
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255;

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Truncate the stem if needed so `stem + suffix + ["." + ext]` fits MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = name_len_units(OsStr::new(suffix));
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead);
        stem_os = truncate_stem(stem, budget);
    }

    let mut new_name = OsString::new();
    new_name.push(&stem_os);
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

fn truncate_stem(stem: &OsStr, budget: usize) -> OsString {
    if budget == 0 {
        return OsString::from("f");
    }
    if let Some(stem_str) = stem.to_str() {
        // Cut on a char boundary.
        let mut end = 0;
        for (idx, ch) in stem_str.char_indices() {
            if idx + ch.len_utf8() > budget {
                break;
            }
            end = idx + ch.len_utf8();
        }
        if end == 0 {
            return OsString::from("f");
        }
        return OsString::from(&stem_str[..end]);
    }
    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = stem.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = stem.to_string_lossy();
        truncate_stem(OsStr::new(lossy.as_ref()), budget)
    }
}
