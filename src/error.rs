//! Error types shared across the merge engine and the menu dispatcher.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a merge or import. None of them leave a partial output behind.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no files to merge")]
    Empty,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// Classify a read failure on `path`.
    pub fn from_read(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            MergeError::NotFound(path)
        } else {
            MergeError::NotReadable { path, source }
        }
    }
}

/// Anything a single menu command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

/// The user pressed Ctrl+C (or closed stdin) at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interrupted by user")]
pub struct Interrupted;
