use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match boxport::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
