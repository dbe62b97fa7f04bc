use clap::Parser;
use rhub_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("rhub error: {:#}", err);
        std::process::exit(1);
    }
}
