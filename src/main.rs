//! Binary entrypoint for the `relsync` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are selected in context::ServiceContext::for_config.
    match relsync::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
