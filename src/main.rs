use std::process::ExitCode;

use relocate::RelocateError;
use relocate::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = relocate::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<RelocateError>()
                .map_or(1, RelocateError::code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
