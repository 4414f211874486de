use std::process::ExitCode;

use twig::ui::output;

fn main() -> ExitCode {
    match twig::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
