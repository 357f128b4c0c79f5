//! orgchain CLI: find the chain of command between two employees.
//!
//! Reads a hierarchy file, joins both employees' management chains at their
//! lowest common manager and prints the resulting path.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
