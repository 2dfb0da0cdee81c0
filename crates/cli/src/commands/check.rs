//! Default command: stage the files, run golint then go vet, print diagnostics

use anyhow::Result;
use colored::Colorize;
use golintfile_core::{ExternalVet, GoLinter, GolintfileConfig, Orchestrator, StagingSet};
use std::io;
use std::path::PathBuf;

use crate::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let min_confidence = cli.min_confidence.unwrap_or(config.lint.min_confidence);

    // the scratch directory goes away when `staging` drops, early returns included
    let mut staging = StagingSet::build_with(cli.files.as_slice(), config.staging_options())?;

    let linter = GoLinter::new();
    let vet = ExternalVet::new(config.vet.program.clone(), &config.vet.args);
    let mut orchestrator = Orchestrator::new(&staging, &linter, min_confidence);
    if config.vet.enabled && !cli.no_vet {
        orchestrator = orchestrator.with_vet(&vet);
    }

    let stdout = io::stdout();
    if let Err(e) = orchestrator.run(&mut stdout.lock()) {
        eprintln!("  {}: failed to write diagnostics: {}", "warn".yellow(), e);
    }

    if let Err(e) = staging.release() {
        eprintln!(
            "  {}: failed to remove temporary directory: {}",
            "warn".yellow(),
            e
        );
    }

    Ok(())
}

/// Explicit `--config` file, else the nearest .golintfile.toml, else defaults
pub fn load_config(cli: &Cli) -> Result<GolintfileConfig> {
    match &cli.config {
        Some(path) => GolintfileConfig::from_file(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            GolintfileConfig::find_and_load(&cwd)
        }
    }
}
