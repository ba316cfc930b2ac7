//! Verbatim import of an external file as the merged output.

use std::path::{Path, PathBuf};

use super::output;
use crate::error::MergeError;

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub output: PathBuf,
    pub bytes: u64,
}

/// Copy `source` byte-for-byte over `output`. No dedup or sorting happens
/// here; a 0-byte source produces a 0-byte output.
pub fn import_as_merged(source: &Path, output: &Path) -> Result<ImportReport, MergeError> {
    if !source.is_file() {
        return Err(MergeError::NotFound(source.to_path_buf()));
    }
    let bytes =
        std::fs::read(source).map_err(|e| MergeError::from_read(source.to_path_buf(), e))?;
    output::replace_contents(output, &bytes).map_err(|source| MergeError::WriteFailed {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::debug!("imported {} ({} bytes)", source.display(), bytes.len());
    Ok(ImportReport {
        output: output.to_path_buf(),
        bytes: bytes.len() as u64,
    })
}
