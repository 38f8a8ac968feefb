use std::process::ExitCode;

fn main() -> ExitCode {
    match boxdedup::run() {
        Ok(()) => ExitCode::SUCCESS,
        // The report has already been printed to stdout.
        Err(boxdedup::DedupError::ValidationFailed { .. }) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
