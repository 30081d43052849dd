use std::env;
use std::io;
use std::process::ExitCode;

use tracing::error;

mod app;

use app::CliError;

fn main() -> ExitCode {
    app::init_tracing();
    let args = env::args().skip(1).collect::<Vec<_>>();
    match app::run(&args, &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
        Err(err) => {
            error!(error = %err, "scene_export_failed");
            ExitCode::from(1)
        }
    }
}
