//! Drives the style pass and the correctness pass over one staging set
//!
//! Both passes see the same working paths and translate every reported path
//! back through [`StagingSet::resolve`], so output only ever names files the
//! user passed in. The style pass always runs first; the two passes are not
//! deduplicated against each other.

use crate::diagnostic::{Diagnostic, Origin, Severity};
use crate::lint::StyleLinter;
use crate::staging::StagingSet;
use crate::vet::{parse_vet_output, VetRunner};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Default minimum confidence for style problems
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.8;

pub struct Orchestrator<'a> {
    staging: &'a StagingSet,
    linter: &'a dyn StyleLinter,
    vet: Option<&'a dyn VetRunner>,
    min_confidence: f64,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator with only the style pass enabled
    pub fn new(staging: &'a StagingSet, linter: &'a dyn StyleLinter, min_confidence: f64) -> Self {
        Self {
            staging,
            linter,
            vet: None,
            min_confidence,
        }
    }

    /// Enable the correctness pass.
    pub fn with_vet(mut self, vet: &'a dyn VetRunner) -> Self {
        self.vet = Some(vet);
        self
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Run both passes and write one line per diagnostic to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for diagnostic in self.style_diagnostics() {
            writeln!(out, "{}", diagnostic)?;
        }
        for diagnostic in self.correctness_diagnostics() {
            writeln!(out, "{}", diagnostic)?;
        }
        out.flush()
    }

    /// Style problems at or above the confidence threshold.
    ///
    /// A whole-set lint failure yields nothing: it is a syntax error that the
    /// correctness pass reports on its own.
    pub fn style_diagnostics(&self) -> Vec<Diagnostic> {
        let mut files = BTreeMap::new();
        for path in self.staging.working_paths() {
            match std::fs::read(path) {
                Ok(source) => {
                    files.insert(path.clone(), source);
                }
                Err(e) => {
                    eprintln!(
                        "  {}: {}: {}",
                        "warn".yellow(),
                        self.staging.resolve(path).display(),
                        e
                    );
                }
            }
        }

        let problems = match self.linter.lint_files(&files) {
            Ok(problems) => problems,
            Err(_) => return Vec::new(),
        };

        problems
            .into_iter()
            .filter(|p| p.confidence >= self.min_confidence)
            .map(|p| Diagnostic {
                source_path: self.staging.resolve(&p.position.filename).to_path_buf(),
                line: p.position.line,
                column: p.position.column,
                severity: Severity::Warning,
                message: p.text,
                origin: Origin::Style,
            })
            .collect()
    }

    /// Findings from the correctness analyzer.
    ///
    /// Nothing is spawned when the pass is disabled or there are no files.
    pub fn correctness_diagnostics(&self) -> Vec<Diagnostic> {
        let Some(vet) = self.vet else {
            return Vec::new();
        };
        let files = self.staging.working_paths();
        if files.is_empty() {
            return Vec::new();
        }

        let output = match vet.run(files) {
            Ok(output) => output,
            Err(e) => {
                eprintln!(
                    "  {}: failed to run `{}`: {}",
                    "warn".yellow(),
                    vet.name(),
                    e
                );
                return Vec::new();
            }
        };

        let (findings, errors) = parse_vet_output(&output);
        for err in &errors {
            eprintln!(
                "  {}: error processing `go vet` output: {}",
                "warn".yellow(),
                err
            );
        }

        findings
            .into_iter()
            .map(|f| Diagnostic {
                source_path: self.staging.resolve(&f.file).to_path_buf(),
                line: f.line,
                column: f.column,
                severity: f.severity,
                message: f.message,
                origin: Origin::Correctness,
            })
            .collect()
    }
}
