//! Normalized diagnostics shared by the style and correctness passes

use std::fmt;
use std::path::PathBuf;

/// Severity word printed in a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which analyzer produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// golint-style findings
    Style,
    /// go vet findings
    Correctness,
}

/// A single analyzer-agnostic diagnostic
///
/// `source_path` is always a path the user supplied, never a staged copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub source_path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
}

impl Diagnostic {
    /// Trailing tool label, if the line carries one.
    ///
    /// Internal vet failures (`error` severity) are printed without a label.
    pub fn label(&self) -> Option<&'static str> {
        match (self.origin, self.severity) {
            (Origin::Style, _) => Some("golint"),
            (Origin::Correctness, Severity::Warning) => Some("go vet"),
            (Origin::Correctness, Severity::Error) => None,
        }
    }
}

/// Renders the `<path>:<line>:<col>: <severity>: <message>[ (<label>)]` line
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.source_path.display(),
            self.line,
            self.column,
            self.severity,
            self.message
        )?;
        if let Some(label) = self.label() {
            write!(f, " ({})", label)?;
        }
        Ok(())
    }
}
