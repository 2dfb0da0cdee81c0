//! golintfile - golint and go vet for files an editor hands us

use clap::Parser;
use colored::Colorize;
use golintfile_cli::{commands, normalize_go_flags, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_go_flags(std::env::args_os()));

    match commands::check::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("  {}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
