//! Core library for section-sync: copies boundary-delimited sections from a
//! model file into any number of target files.
//!
//! A section is the text between two occurrences of the same boundary marker,
//! e.g. `<!-- UPDATE: usage -->`. Sections are read from the model with
//! [`read_model_file`] and written into targets with [`replace_in_file`].

pub mod boundary;
pub mod error;
pub mod model;
pub mod replacer;

pub use crate::boundary::{BoundaryPattern, DEFAULT_BOUNDARY, KEY_PLACEHOLDER};
pub use crate::error::SyncError;
pub use crate::model::{read_model_file, ModelMap, Section};
pub use crate::replacer::{replace_in_file, replace_sections, Replacement, TargetUpdate};

use std::fmt;
use std::path::PathBuf;

/// Everything a run needs: the model, its targets, and the boundary template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub model: PathBuf,
    pub targets: Vec<PathBuf>,
    pub boundary: BoundaryPattern,
}

impl SyncConfig {
    /// Builds a configuration from the file list given on the command line.
    ///
    /// The first path is the model, the rest are targets. Fails if fewer than
    /// two paths are given, or if any of them does not exist; in the latter
    /// case every missing path is reported.
    pub fn from_paths(paths: Vec<PathBuf>, boundary: BoundaryPattern) -> Result<Self, SyncError> {
        if paths.len() < 2 {
            return Err(SyncError::InsufficientFiles(paths.len()));
        }

        let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.exists()).cloned().collect();
        if !missing.is_empty() {
            return Err(SyncError::MissingFiles(missing));
        }

        let mut paths = paths.into_iter();
        let model = paths.next().unwrap_or_default();

        Ok(Self {
            model,
            targets: paths.collect(),
            boundary,
        })
    }
}

/// Running totals printed at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub changes: usize,
    pub files: usize,
}

impl SyncSummary {
    pub fn record(&mut self, changes: usize) {
        self.changes += changes;
        self.files += 1;
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Made {} changes across {} files",
            self.changes, self.files
        )
    }
}
