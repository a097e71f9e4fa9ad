use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use viewkeys::cli::{run, CliArgs};

fn main() -> Result<ExitCode> {
    viewkeys::tracing::init();

    let args = CliArgs::parse();
    tracing::debug!(?args, "Parsed command line");

    run(args)
}
