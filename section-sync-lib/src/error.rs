//! Defines custom error types for the library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type returned when a synchronisation run cannot proceed.
pub enum SyncError {
    #[error("At least two files need to be provided, with the first being the model file to read and any more being the files to replace within. {0} file(s) provided.")]
    InsufficientFiles(usize),

    #[error("The following provided file(s) could not be found: {}", join_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    #[error("Invalid boundary pattern: {0}")]
    InvalidBoundary(String),

    #[error("Failed to read file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Returns `true` for errors raised while checking the command-line file list,
    /// before any file has been read.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SyncError::InsufficientFiles(_) | SyncError::MissingFiles(_)
        )
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
