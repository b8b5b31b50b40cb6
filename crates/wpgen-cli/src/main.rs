//! wpgen - webpack configuration generator.
//!
//! Parses arguments, sets up logging, and runs the requested command.

use clap::Parser;
use miette::Result;
use wpgen_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::execute(args).map_err(error::cli_error_to_miette)
}
