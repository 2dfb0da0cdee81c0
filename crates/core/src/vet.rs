//! Correctness analysis (go vet) adapter
//!
//! go vet is an external process whose combined output is plain text. Two line
//! shapes matter:
//!
//! - `file:line: message` for ordinary findings
//! - `vet: <context>: file:line:col: message` for vet's own failures, e.g.
//!   type-checking errors; the sentinel `vet: no files checked` is ignored
//!
//! The positional splitting below is the only place that knows about that
//! format.

use crate::diagnostic::Severity;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

/// Prefix of vet's internal-error lines
pub const INTERNAL_ERROR_MARKER: &str = "vet:";

/// Line vet prints when it was given nothing to check
pub const NO_FILES_CHECKED: &str = "vet: no files checked";

/// Runs the correctness analyzer and returns its combined output
pub trait VetRunner: Send + Sync {
    /// Short tool name used in log messages
    fn name(&self) -> &str;

    /// Run the analyzer over `files`; the exit status carries no meaning.
    fn run(&self, files: &[PathBuf]) -> io::Result<Vec<u8>>;
}

/// `go tool vet` (or any compatible command) run as a child process
#[derive(Debug, Clone)]
pub struct ExternalVet {
    program: String,
    args: Vec<String>,
}

impl ExternalVet {
    pub fn new(program: impl Into<String>, args: &[String]) -> Self {
        Self {
            program: program.into(),
            args: args.to_vec(),
        }
    }
}

impl Default for ExternalVet {
    fn default() -> Self {
        Self::new("go", &["tool".to_string(), "vet".to_string()])
    }
}

impl VetRunner for ExternalVet {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, files: &[PathBuf]) -> io::Result<Vec<u8>> {
        // vet exits non-zero when it finds something, so only spawn errors count
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(files)
            .output()?;

        // streams are captured separately, so interleaving is lost: stdout comes first
        let mut combined = output.stdout;
        if !combined.is_empty() && !combined.ends_with(b"\n") && !output.stderr.is_empty() {
            combined.push(b'\n');
        }
        combined.extend_from_slice(&output.stderr);
        Ok(combined)
    }
}

/// A finding parsed from one line of vet output, path not yet resolved
#[derive(Debug, Clone, PartialEq)]
pub struct VetFinding {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub message: String,
}

/// Why a vet output line could not be used
#[derive(Error, Debug, PartialEq)]
pub enum VetLineError {
    #[error("missing field `{field}` in {line:?}")]
    MissingField { field: &'static str, line: String },

    #[error("invalid {field} {value:?} in {line:?}")]
    BadNumber {
        field: &'static str,
        value: String,
        line: String,
    },
}

/// Parse one line of vet output.
///
/// Returns `Ok(None)` for lines that carry no finding: blank lines, package
/// headers (`# pkg`), and the "no files checked" sentinel.
pub fn parse_vet_line(line: &str) -> Result<Option<VetFinding>, VetLineError> {
    if line.trim().is_empty() || line.starts_with('#') || line == NO_FILES_CHECKED {
        return Ok(None);
    }

    if !line.starts_with(INTERNAL_ERROR_MARKER) {
        let parts: Vec<&str> = line.splitn(3, ':').collect();
        let file = field(&parts, 0, "file", line)?;
        let line_no = number(field(&parts, 1, "line", line)?, "line", line)?;
        let message = field(&parts, 2, "message", line)?.trim();
        return Ok(Some(VetFinding {
            file: PathBuf::from(file),
            line: line_no,
            column: 1,
            severity: Severity::Warning,
            message: message.to_string(),
        }));
    }

    let parts: Vec<&str> = line.splitn(6, ':').collect();
    let file = field(&parts, 2, "file", line)?.trim();
    let line_no = number(field(&parts, 3, "line", line)?, "line", line)?;
    let column = number(field(&parts, 4, "column", line)?, "column", line)?;
    let message = field(&parts, 5, "message", line)?.trim();
    Ok(Some(VetFinding {
        file: PathBuf::from(file),
        line: line_no,
        column,
        severity: Severity::Error,
        message: message.to_string(),
    }))
}

/// Parse all of vet's output.
///
/// Lines that cannot be decoded or parsed are returned as errors alongside the
/// findings so the caller can report them without losing the rest.
pub fn parse_vet_output(output: &[u8]) -> (Vec<VetFinding>, Vec<String>) {
    let mut findings = Vec::new();
    let mut errors = Vec::new();

    for line in output.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                errors.push(e.to_string());
                continue;
            }
        };
        match parse_vet_line(&line) {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(e) => errors.push(e.to_string()),
        }
    }

    (findings, errors)
}

fn field<'a>(
    parts: &[&'a str],
    index: usize,
    name: &'static str,
    line: &str,
) -> Result<&'a str, VetLineError> {
    parts
        .get(index)
        .copied()
        .ok_or_else(|| VetLineError::MissingField {
            field: name,
            line: line.to_string(),
        })
}

fn number(value: &str, name: &'static str, line: &str) -> Result<usize, VetLineError> {
    value
        .trim()
        .parse()
        .map_err(|_| VetLineError::BadNumber {
            field: name,
            value: value.to_string(),
            line: line.to_string(),
        })
}
