//! Top-level dispatcher.
//! Validates options, normalizes both paths, checks the source, and routes to
//! the file or folder resolver. Nothing touches the filesystem before the
//! source has been classified.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::ResultCode;
use crate::location::Location;
use crate::options::{OpMode, Options, Overrides};
use crate::outcome::Outcome;

use super::{Engine, HostFs, LocalFs};

/// Copy a file or folder on the local filesystem.
pub fn copy_entry(src: &str, dst: &str, overrides: &Overrides) -> Outcome {
    resolve_entry(&LocalFs, OpMode::Copy.as_str(), src, dst, overrides)
}

/// Move a file or folder on the local filesystem.
pub fn move_entry(src: &str, dst: &str, overrides: &Overrides) -> Outcome {
    resolve_entry(&LocalFs, OpMode::Move.as_str(), src, dst, overrides)
}

/// [`copy_entry`] over caller-supplied primitives.
pub fn copy_entry_with<F: HostFs + ?Sized>(fs: &F, src: &str, dst: &str, overrides: &Overrides) -> Outcome {
    resolve_entry(fs, OpMode::Copy.as_str(), src, dst, overrides)
}

/// [`move_entry`] over caller-supplied primitives.
pub fn move_entry_with<F: HostFs + ?Sized>(fs: &F, src: &str, dst: &str, overrides: &Overrides) -> Outcome {
    resolve_entry(fs, OpMode::Move.as_str(), src, dst, overrides)
}

/// Resolve one copy/move request.
///
/// Validation order is operation mode, file mode, folder mode, then source
/// existence; the first failing check decides the code. The run timestamp
/// used by every rename-dts decision below this call is taken once, here.
pub fn resolve_entry<F: HostFs + ?Sized>(
    fs: &F,
    op_mode: &str,
    src: &str,
    dst: &str,
    overrides: &Overrides,
) -> Outcome {
    let stamp = Utc::now().timestamp_millis();
    let src = Location::parse(src);
    let dst = Location::parse(dst);

    let opts = match Options::resolve(op_mode, overrides, stamp) {
        Ok(opts) => opts,
        Err(code) => {
            let value = match code {
                ResultCode::BadFilemode => overrides.file_mode.as_deref(),
                ResultCode::BadFldrmode => overrides.folder_mode.as_deref(),
                _ => Some(op_mode),
            };
            debug!(%code, op_mode, ?overrides, "rejected options");
            return Outcome::rejected_option(code, value.unwrap_or_default(), src.as_path(), dst.as_path());
        }
    };

    if !src.exists(fs) {
        debug!(src = %src, "source not found");
        return Outcome::failure(ResultCode::SrcNotfound, src.as_path(), src.as_path(), dst.as_path());
    }

    debug!(
        src = %src,
        dst = %dst,
        mode = %opts.op_mode(),
        file_mode = %opts.file_mode(),
        folder_mode = %opts.folder_mode(),
        recursive = opts.recursive(),
        stamp,
        "dispatch"
    );

    let engine = Engine::new(fs, &opts);
    let outcome = if src.is_file(fs) {
        engine.resolve_file(&src, &dst)
    } else if src.is_dir(fs) {
        engine.resolve_folder(&src, &dst, 0)
    } else {
        Outcome::new(
            ResultCode::Unknown,
            format!("source is neither a file nor a folder: '{}'", src),
            src.as_path(),
            dst.as_path(),
        )
    };

    if outcome.is_success() {
        info!(
            src = %outcome.source().display(),
            dst = %outcome.destination().display(),
            mode = %opts.op_mode(),
            "{}",
            outcome.message()
        );
    } else {
        warn!(code = %outcome.code(), mode = %opts.op_mode(), "{}", outcome.message());
    }
    outcome
}
