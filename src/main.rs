mod absorption_cmd;
mod cli;
mod demo;
mod logging;
mod stationary_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Absorption(args) => absorption_cmd::run(args),
        Command::Stationary(args) => stationary_cmd::run(args),
    }
}
