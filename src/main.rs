//! `lobster-doxygen` command-line tool
//!
//! Converts a Doxygen XML output directory into a LOBSTER interchange file.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    cli::Cli::parse().run()
}
