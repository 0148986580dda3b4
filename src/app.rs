//! Application orchestrator.
//! Loads/merges config, initializes logging, runs the copy/move, and maps the
//! outcome to output and an exit status.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{debug, error, info};

use relocate::cli::{Args, Command, ConfigArgs};
use relocate::config::{create_template_config, default_config_path, load_config};
use relocate::output as out;
use relocate::{Config, OpMode, copy_entry, move_entry};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    let (transfer, op) = match &args.command {
        Command::Copy(t) => (t, OpMode::Copy),
        Command::Move(t) => (t, OpMode::Move),
        Command::Config(c) => return run_config(c),
    };

    let mut cfg: Config = load_config()
        .context("load relocate config")?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!(?args, ?cfg, "starting relocate");

    let outcome = match op {
        OpMode::Copy => copy_entry(&transfer.source, &transfer.destination, &cfg.defaults),
        OpMode::Move => move_entry(&transfer.source, &transfer.destination, &cfg.defaults),
    };

    if outcome.is_success() {
        info!(
            source = %outcome.source().display(),
            dest = %outcome.destination().display(),
            "Operation completed"
        );
    } else {
        error!(
            code = outcome.code().value(),
            kind = outcome.code().name(),
            source = %outcome.source().display(),
            dest = %outcome.destination().display(),
            "{}",
            outcome.message()
        );
    }
    out::print_outcome(&outcome, args.json);

    // Flush the file appender before exit.
    drop(guard);

    Ok(ExitCode::from(outcome.code().value() as u8))
}

fn run_config(c: &ConfigArgs) -> Result<ExitCode> {
    let path = default_config_path()?;
    if c.init {
        create_template_config(&path)
            .with_context(|| format!("write template config to {}", path.display()))?;
        out::print_info(&format!("Wrote template config to: {}", path.display()));
        return Ok(ExitCode::SUCCESS);
    }

    out::print_info(&format!("Config path: {}", path.display()));
    if path.exists() {
        out::print_info("A config file exists at that location.");
    } else {
        out::print_info("No config file there yet. Run `relocate config --init` to create a template.");
    }
    Ok(ExitCode::SUCCESS)
}
