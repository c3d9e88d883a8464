//! BEAM - Building Emissions Accounting for Materials
//!
//! A CLI host for the material ledger: edit component tables, review the
//! emissions summary, and export a spreadsheet report.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_config()) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
