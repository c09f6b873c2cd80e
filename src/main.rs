use std::process;

use clap::Parser;

use xsheel::cli::args::DispatchCli;
use xsheel::cli::commands::{execute_dispatch, execute_parse_failure};
use xsheel::cli::logging::{setup_logging, verbosity_from_env};
use xsheel::cli::output;

fn main() {
    let cli = match DispatchCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => process::exit(execute_parse_failure(e)),
    };

    setup_logging(verbosity_from_env());

    match execute_dispatch(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&e);
            process::exit(e.exit_code());
        }
    }
}
