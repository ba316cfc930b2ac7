//! Merge engine: union the lines of several text files into one sorted,
//! deduplicated output.
//!
//! Every input is read fully before anything is written, and the output is
//! replaced in one step, so a failed merge leaves the previous artifact as it
//! was.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::output;
use crate::error::MergeError;

// ───────────────────────────────────────── report ────────────

/// Per-input statistics gathered while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSummary {
    pub path: PathBuf,
    /// Non-empty (after trimming) lines read, duplicates included.
    pub lines: usize,
    /// Invalid UTF-8 sequences were skipped.
    pub lossy: bool,
    /// Detected MIME type, set only when the content does not look like text.
    pub non_text: Option<&'static str>,
}

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub output: PathBuf,
    /// Lines in the written output.
    pub line_count: usize,
    pub inputs: Vec<InputSummary>,
}

// ───────────────────────────────────────── operations ────────

/// Merge every file in `paths` into `output`.
///
/// Lines are trimmed, blank lines dropped, and the remainder deduplicated by
/// exact (case- and whitespace-sensitive) equality, then written in byte
/// order joined by `\n`.
pub fn merge_files(paths: &[PathBuf], output: &Path) -> Result<MergeReport, MergeError> {
    if paths.is_empty() {
        return Err(MergeError::Empty);
    }

    let mut lines = BTreeSet::new();
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        inputs.push(read_into(path, &mut lines)?);
    }

    let contents = render(&lines);
    output::replace_contents(output, contents.as_bytes()).map_err(|source| {
        MergeError::WriteFailed {
            path: output.to_path_buf(),
            source,
        }
    })?;

    tracing::debug!(
        "merged {} file(s) into {} ({} lines)",
        paths.len(),
        output.display(),
        lines.len()
    );
    Ok(MergeReport {
        output: output.to_path_buf(),
        line_count: lines.len(),
        inputs,
    })
}

/// Two-file merge; same semantics as [`merge_files`].
pub fn merge_two(a: &Path, b: &Path, output: &Path) -> Result<MergeReport, MergeError> {
    merge_files(&[a.to_path_buf(), b.to_path_buf()], output)
}

// ───────────────────────────────────────── helpers ───────────

fn read_into(path: &Path, lines: &mut BTreeSet<String>) -> Result<InputSummary, MergeError> {
    let bytes = std::fs::read(path).map_err(|e| MergeError::from_read(path.to_path_buf(), e))?;

    let mime = tree_magic_mini::from_u8(&bytes);
    let non_text = (!bytes.is_empty() && !mime.starts_with("text/")).then_some(mime);
    if let Some(mime) = non_text {
        tracing::warn!("{} looks like {mime}, merging anyway", path.display());
    }

    let (text, lossy) = decode(&bytes);
    if lossy {
        tracing::warn!("skipped invalid UTF-8 in {}", path.display());
    }

    Ok(InputSummary {
        path: path.to_path_buf(),
        lines: collect_lines(&text, lines),
        lossy,
        non_text,
    })
}

/// Decode UTF-8, dropping invalid sequences. The flag reports whether any
/// bytes were dropped.
fn decode(bytes: &[u8]) -> (String, bool) {
    let mut text = String::with_capacity(bytes.len());
    let mut lossy = false;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        lossy |= !chunk.invalid().is_empty();
    }
    (text, lossy)
}

/// Add the trimmed, non-empty lines of `text` to `set`; returns how many
/// such lines were seen. `\n`, `\r\n` and a lone `\r` all end a line.
fn collect_lines(text: &str, set: &mut BTreeSet<String>) -> usize {
    let mut seen = 0;
    for line in text.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        seen += 1;
        if !set.contains(line) {
            set.insert(line.to_string());
        }
    }
    seen
}

fn render(lines: &BTreeSet<String>) -> String {
    lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
}
