//! golintfile core - lint and vet loose Go files
//!
//! golint and go vet only accept well-formed package files. This crate lets
//! them run over whatever an editor hands us:
//! - staging of files without a `.go` extension into a scratch directory
//! - a tree-sitter based golint-style linter
//! - an adapter around `go tool vet` and its text output
//! - diagnostics normalized back to the user's own paths

pub mod config;
pub mod diagnostic;
pub mod lint;
pub mod orchestrator;
pub mod staging;
pub mod vet;

pub use config::GolintfileConfig;
pub use diagnostic::{Diagnostic, Origin, Severity};
pub use lint::{GoLinter, LintError, Position, Problem, StyleLinter};
pub use orchestrator::{Orchestrator, DEFAULT_MIN_CONFIDENCE};
pub use staging::{StagingError, StagingOptions, StagingSet};
pub use vet::{parse_vet_line, parse_vet_output, ExternalVet, VetFinding, VetLineError, VetRunner};

/// golintfile version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
