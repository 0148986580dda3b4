//! User-facing terminal lines.
//! Colours are used only when the target stream is a TTY.

use owo_colors::OwoColorize;

use crate::outcome::Outcome;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print an outcome: `SUCCESS: <message>` on stdout, or the code and message
/// on stderr. With `json`, the serialized record goes to stdout either way.
pub fn print_outcome(outcome: &Outcome, json: bool) {
    if json {
        match serde_json::to_string(outcome) {
            Ok(line) => println!("{line}"),
            Err(e) => print_error(&format!("could not serialize outcome: {e}")),
        }
        return;
    }

    if outcome.is_success() {
        if stdout_tty() {
            println!("{} {}", "SUCCESS:".green().bold(), outcome.message());
        } else {
            println!("SUCCESS: {}", outcome.message());
        }
    } else if stderr_tty() {
        eprintln!(
            "{} {}",
            format!("{}:", outcome.code()).red().bold(),
            outcome.message()
        );
    } else {
        eprintln!("{}: {}", outcome.code(), outcome.message());
    }
}
