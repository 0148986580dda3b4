//! XML configuration support.
//! - Loads option defaults and logging settings from config.xml (quick_xml).
//! - Writes a commented template on request.
//!
//! Notes:
//! - Unknown XML fields are rejected so misconfigurations surface early.
//! - Mode strings are not validated here; the engine reports bad values with
//!   its own BAD_FILEMODE / BAD_FLDRMODE codes.

use anyhow::{Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::errors::RelocateError;
use crate::options::{FileMode, FolderMode, MAX_DEPTH_DEFAULT, Overrides};
use crate::platform::{restrict_dir, restrict_file, write_new_private};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "file_mode")]
    file_mode: Option<String>,
    #[serde(rename = "folder_mode")]
    folder_mode: Option<String>,
    #[serde(rename = "recursive")]
    recursive: Option<bool>,
    #[serde(rename = "max_depth", default, deserialize_with = "de_usize_trimmed_opt")]
    max_depth: Option<usize>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Optional usize that tolerates surrounding whitespace; an empty element is unset.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<usize>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("max_depth: expected a non-negative integer, got '{s}': {e}"))
        }),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.defaults = Overrides {
        file_mode: non_empty(parsed.file_mode),
        folder_mode: non_empty(parsed.folder_mode),
        recursive: parsed.recursive,
        max_depth: parsed.max_depth,
    };

    if let Some(level) = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok())
    {
        cfg.log_level = level;
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> std::result::Result<Config, RelocateError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RelocateError::ConfigNotFound(path.to_path_buf())
        } else {
            RelocateError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;
    let parsed: XmlConfig =
        from_xml_str(&contents).map_err(|e| RelocateError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!(path = %path.display(), "loaded config");
    Ok(xml_to_config(parsed))
}

/// Load the active config.
///
/// - `$RELOCATE_CONFIG` set: that file must exist and parse.
/// - otherwise the default location is used when present; `Ok(None)` when missing.
pub fn load_config() -> std::result::Result<Option<Config>, RelocateError> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|p| !p.is_empty());
    let path = default_config_path()?;
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}

/// Write the commented template config to `path` (refuses to overwrite).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(RelocateError::SymlinkAncestor(path.to_path_buf()).into());
    }

    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("config path has no parent: {}", path.display()))?;
    let parent_existed = parent.exists();
    fs::create_dir_all(parent)?;
    if !parent_existed {
        let _ = restrict_dir(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/relocate.log".into());

    let content = format!(
        "<!--\n  relocate configuration (XML)\n\n  Option defaults (CLI flags override these):\n    file_mode    -> abort | skip | rename-dts | replace\n    folder_mode  -> abort | skip | rename-dts | replace | merge\n    recursive    -> true | false (descend into subfolders when walking)\n    max_depth    -> deepest folder level the walk may reach\n\n  Logging:\n    log_level    -> quiet | normal | info | debug\n    log_file     -> path to log file (optional; stderr is still used)\n-->\n<config>\n  <file_mode>{}</file_mode>\n  <folder_mode>{}</folder_mode>\n  <recursive>true</recursive>\n  <max_depth>{}</max_depth>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        FileMode::default(),
        FolderMode::default(),
        MAX_DEPTH_DEFAULT,
        suggested_log
    );

    write_new_private(path, content.as_bytes())?;
    let _ = restrict_file(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
