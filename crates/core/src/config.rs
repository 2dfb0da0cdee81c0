//! Configuration file parsing for .golintfile.toml

use crate::orchestrator::DEFAULT_MIN_CONFIDENCE;
use crate::staging::{StagingOptions, DEFAULT_EXTENSION, DEFAULT_TEMP_PREFIX};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up from the working directory
pub const CONFIG_FILE_NAME: &str = ".golintfile.toml";

/// Main configuration structure for .golintfile.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GolintfileConfig {
    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub vet: VetConfig,

    #[serde(default)]
    pub staging: StagingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Style problems below this confidence are not printed
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VetConfig {
    /// Run the correctness pass
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Executable to run
    #[serde(default = "default_vet_program")]
    pub program: String,

    /// Arguments placed before the file list
    #[serde(default = "default_vet_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Extension the analyzers require (with or without the leading dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Prefix of the scratch directory name
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Colour the messages written to stderr
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_true() -> bool {
    true
}

fn default_vet_program() -> String {
    "go".to_string()
}

fn default_vet_args() -> Vec<String> {
    vec!["tool".to_string(), "vet".to_string()]
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_temp_prefix() -> String {
    DEFAULT_TEMP_PREFIX.to_string()
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

impl Default for VetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_vet_program(),
            args: default_vet_args(),
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            temp_prefix: default_temp_prefix(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl GolintfileConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: GolintfileConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Find and load .golintfile.toml from `start_dir` or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Staging options derived from the `[staging]` table
    pub fn staging_options(&self) -> StagingOptions {
        let extension = self.staging.extension.trim_start_matches('.');
        StagingOptions {
            extension: if extension.is_empty() {
                DEFAULT_EXTENSION.to_string()
            } else {
                extension.to_string()
            },
            temp_prefix: self.staging.temp_prefix.clone(),
            temp_root: None,
        }
    }
}
