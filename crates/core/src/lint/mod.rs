//! Style analysis (golint) seam
//!
//! The style pass hands every file of the set to a [`StyleLinter`] at once so
//! cross-file facts (package name, package comment) can be resolved. A linter
//! either returns problems with a confidence score or rejects the whole set.

pub mod go;
mod naming;

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub use go::GoLinter;

/// Where a problem was found
///
/// `filename` is the key the file was submitted under. Line and column are
/// 1-based; the column counts bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub filename: PathBuf,
    pub line: usize,
    pub column: usize,
}

/// A single style problem
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub position: Position,

    /// Linter's certainty that this is a real issue, 0.0..=1.0
    pub confidence: f64,

    pub text: String,
}

/// Whole-set failures; no problems are reported when one of these occurs
#[derive(Error, Debug)]
pub enum LintError {
    #[error("{}:{line}:{column}: syntax error", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("{} is in package {found}, not {expected}", file.display())]
    MultiplePackages {
        file: PathBuf,
        found: String,
        expected: String,
    },

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

/// A style analyzer operating on a complete file set
pub trait StyleLinter: Send + Sync {
    /// Lint all files together as one package.
    fn lint_files(&self, files: &BTreeMap<PathBuf, Vec<u8>>) -> Result<Vec<Problem>, LintError>;
}
