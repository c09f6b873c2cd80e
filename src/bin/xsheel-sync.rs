use std::process;

use clap::Parser;

use xsheel::cli::args::SyncCli;
use xsheel::cli::commands::execute_sync;
use xsheel::cli::logging::setup_logging;
use xsheel::cli::output;
use xsheel::exitcode;

fn main() {
    let cli = SyncCli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_sync(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
    process::exit(exitcode::OK);
}
