use std::process::ExitCode;

use clap::Parser;

mod config;
mod driver;
mod printer;

use config::{Cli, RunConfig};
use sieve_runtime::logging;

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    driver::run(&RunConfig::from_args(&cli))
}
