//! Path staging for analyzers that only accept `.go` files
//!
//! golint and go vet refuse files that don't carry the `.go` extension, but an
//! editor may hand us a buffer saved as `notes.txt` or a file with no extension
//! at all. [`StagingSet`] copies such inputs into a scratch directory under a
//! conforming name, remembers where each copy came from, and removes the
//! directory again when released or dropped.

use colored::Colorize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

/// Extension analyzers require, without the leading dot
pub const DEFAULT_EXTENSION: &str = "go";

/// Prefix of the scratch directory name
pub const DEFAULT_TEMP_PREFIX: &str = "golintfile.";

/// Errors raised while staging input files
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Failed to create temporary directory: {source}")]
    TempDir { source: io::Error },

    #[error("failed to create temporary file for {path:?}: {source}")]
    Copy { path: PathBuf, source: io::Error },
}

/// How non-conforming files are staged
#[derive(Debug, Clone)]
pub struct StagingOptions {
    /// Conforming extension, without the dot
    pub extension: String,

    /// Prefix for the scratch directory name
    pub temp_prefix: String,

    /// Parent of the scratch directory (system temp dir when `None`)
    pub temp_root: Option<PathBuf>,
}

impl Default for StagingOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            temp_root: None,
        }
    }
}

/// The checker-ready file set for one invocation
///
/// Working paths keep the order (and duplicates) of the inputs. Only staged
/// copies have an entry in the reverse map; every other working path is
/// already the user's own path.
#[derive(Debug)]
pub struct StagingSet {
    options: StagingOptions,
    scratch_dir: Option<TempDir>,
    working_paths: Vec<PathBuf>,
    reverse_map: HashMap<PathBuf, PathBuf>,
    skipped: Vec<StagingError>,
}

impl StagingSet {
    /// Stage `inputs` with the default `.go` options.
    pub fn build<P: AsRef<Path>>(inputs: &[P]) -> Result<Self, StagingError> {
        Self::build_with(inputs, StagingOptions::default())
    }

    /// Stage `inputs` with explicit options.
    ///
    /// Fails only when the scratch directory cannot be allocated. A file that
    /// cannot be copied is reported on stderr and left out of the set.
    pub fn build_with<P: AsRef<Path>>(
        inputs: &[P],
        options: StagingOptions,
    ) -> Result<Self, StagingError> {
        let mut set = Self {
            options,
            scratch_dir: None,
            working_paths: Vec::with_capacity(inputs.len()),
            reverse_map: HashMap::new(),
            skipped: Vec::new(),
        };

        for input in inputs {
            let input = input.as_ref();
            if has_extension(input, &set.options.extension) {
                set.working_paths.push(input.to_path_buf());
                continue;
            }

            let name = staged_name(input, &set.options.extension);
            let staged = set.scratch_dir()?.join(name);
            match copy_file_contents(input, &staged) {
                Ok(_) => {
                    set.working_paths.push(staged.clone());
                    set.reverse_map.insert(staged, input.to_path_buf());
                }
                Err(source) => {
                    let err = StagingError::Copy {
                        path: input.to_path_buf(),
                        source,
                    };
                    eprintln!("  {}: {}", "warn".yellow(), err);
                    set.skipped.push(err);
                }
            }
        }

        Ok(set)
    }

    /// Paths to hand to the analyzers, in input order
    pub fn working_paths(&self) -> &[PathBuf] {
        &self.working_paths
    }

    /// Map a path reported by an analyzer back to the user's path.
    ///
    /// Paths that were never staged are returned unchanged.
    pub fn resolve<'a>(&'a self, path: &'a Path) -> &'a Path {
        self.reverse_map
            .get(path)
            .map(PathBuf::as_path)
            .unwrap_or(path)
    }

    /// Whether `path` is a staged copy owned by this set
    pub fn is_staged(&self, path: &Path) -> bool {
        self.reverse_map.contains_key(path)
    }

    /// Scratch directory, if any input needed staging
    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch_dir.as_ref().map(TempDir::path)
    }

    /// Inputs that could not be staged
    pub fn skipped(&self) -> &[StagingError] {
        &self.skipped
    }

    /// Remove the scratch directory and everything in it.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn release(&mut self) -> io::Result<()> {
        match self.scratch_dir.take() {
            Some(dir) => dir.close(),
            None => Ok(()),
        }
    }

    fn scratch_dir(&mut self) -> Result<&Path, StagingError> {
        let dir = match self.scratch_dir.take() {
            Some(dir) => dir,
            None => {
                let mut builder = tempfile::Builder::new();
                builder.prefix(&self.options.temp_prefix);
                let created = match &self.options.temp_root {
                    Some(root) => builder.tempdir_in(root),
                    None => builder.tempdir(),
                };
                created.map_err(|source| StagingError::TempDir { source })?
            }
        };
        Ok(self.scratch_dir.insert(dir).path())
    }
}

impl Drop for StagingSet {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            eprintln!(
                "  {}: failed to remove temporary directory: {}",
                "warn".yellow(),
                e
            );
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

/// `notes.txt` -> `notes.txt.go`
fn staged_name(input: &Path, extension: &str) -> OsString {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("input"));
    name.push(".");
    name.push(extension);
    name
}

fn copy_file_contents(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    io::copy(&mut input, &mut output)
}
