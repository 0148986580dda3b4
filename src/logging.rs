//! Tracing setup for the binary.
//!
//! Events go to stderr so stdout carries only the result line or JSON
//! record. An optional log file gets the same events through a
//! non-blocking writer; the returned guard must live until exit.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt, registry};

use relocate::output as out;
use relocate::platform::open_log_append;
use relocate::{LogLevel, path_has_symlink_ancestor};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// DD/MM/YY HH:MM:SS in local time.
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

// RUST_LOG is ignored; the level comes from config/flags only.
fn filter_for(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(level.to_string().to_ascii_lowercase())
}

fn layer<W>(writer: W, json: bool, ansi: bool, level: LevelFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer().with_timer(LocalHumanTime).with_writer(writer);
    if json {
        base.event_format(fmt::format().json().with_timer(LocalHumanTime))
            .with_filter(filter_for(level))
            .boxed()
    } else {
        base.with_ansi(ansi)
            .with_target(false)
            .compact()
            .with_filter(filter_for(level))
            .boxed()
    }
}

/// Log file writer, or `None` (with a warning) when the path is unsafe or
/// cannot be opened. File logging never blocks the run.
fn file_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            out::print_warn(&format!(
                "not logging to {}: an ancestor directory is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "not logging to {}: symlink check failed: {e}",
                path.display()
            ));
            return None;
        }
    }

    match open_log_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("not logging to {}: {e}", path.display()));
            None
        }
    }
}

/// Install the global subscriber.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let level = lvl.filter();
    let ansi = atty::is(atty::Stream::Stderr);

    let mut layers = vec![layer(std::io::stderr, json, ansi, level)];
    let mut guard = None;
    if let Some((writer, g)) = log_file.and_then(file_writer) {
        layers.push(layer(writer, json, false, level));
        guard = Some(g);
    }

    registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}
