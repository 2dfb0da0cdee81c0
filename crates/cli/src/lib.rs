//! golintfile CLI library, exposed for integration tests

pub mod commands;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may be spelled Go-style with a single dash
const GO_STYLE_FLAGS: &[&str] = &["min_confidence", "no-vet", "config"];

#[derive(Parser, Debug)]
#[command(name = "golintfile")]
#[command(about = "Run golint and go vet over files that need not form a package on disk", long_about = None)]
#[command(version = golintfile_core::VERSION)]
#[command(override_usage = "golintfile [flags] files... # must be a single package")]
pub struct Cli {
    /// Minimum confidence of a problem to print it [default: 0.8]
    #[arg(long = "min_confidence", value_name = "FLOAT")]
    pub min_confidence: Option<f64>,

    /// Skip the go vet pass
    #[arg(long)]
    pub no_vet: bool,

    /// Config file to use instead of searching for .golintfile.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Files to check; they must belong to one package
    pub files: Vec<PathBuf>,
}

/// Rewrite Go-style flags (`-min_confidence 0.5`, `-min_confidence=0.5`) to
/// the double-dash form clap expects.
///
/// The program name and everything after `--` are left alone.
pub fn normalize_go_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            GO_STYLE_FLAGS.contains(&name).then(|| format!("-{}", s))
        });
        normalized.push(rewritten.map(OsString::from).unwrap_or(arg));
    }

    normalized
}
