use webpgrab_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; a broken log dir must not stop a run.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    let cli = Cli::parse_or_exit();
    if let Err(err) = cli.run() {
        eprintln!("webpgrab error: {:#}", err);
        std::process::exit(1);
    }
}
