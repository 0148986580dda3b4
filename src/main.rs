use std::process::ExitCode;

use relocate::RelocateError;
use relocate::cli;
use relocate::output as out;

mod app;
mod logging;

/// Exit status for failures outside the engine (config, logging setup).
/// Engine outcomes exit with their own result code, all of which are below it.
const EXIT_SETUP_FAILURE: u8 = 255;

fn main() -> ExitCode {
    let args = cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<RelocateError>() {
                Some(re) => out::print_error(&format!("{e:#} (setup error {})", re.code())),
                None => out::print_error(&format!("{e:#}")),
            }
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}
