mod admit_cmd;
mod cli;
mod config;
mod convert;
mod estimate_cmd;
mod logging;
mod pipeline;
mod scalogram_cmd;
mod xscalogram_cmd;

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
        Command::Scalogram(args) => scalogram_cmd::run(args),
        Command::Xscalogram(args) => xscalogram_cmd::run(args),
        Command::Admit(args) => admit_cmd::run(args),
        Command::Estimate(args) => estimate_cmd::run(args),
    }
}
