//! Snapshot of a single filesystem node as seen by the browser.
//!
//! An [`Entry`] is taken at listing time and never refreshed; the browser
//! re-lists a directory on every visit instead of keeping entries around.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ───────────────────────────────────────── kind ──────────────

/// What an entry is, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Directory => "dir",
            EntryKind::File => "file",
        }
    }
}

// ───────────────────────────────────────── entry ─────────────

/// One directory or regular file surfaced at a browse level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Base name, lossily converted for display.
    pub name: String,
    pub kind: EntryKind,
    pub path: PathBuf,
    /// Byte length (meaningless for directories, kept for display).
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Entry {
    /// Stat `path` (following symlinks) and build an entry.
    ///
    /// Returns `Ok(None)` for nodes that are neither directories nor regular
    /// files, e.g. sockets or FIFOs.
    pub fn from_path(path: &Path) -> std::io::Result<Option<Self>> {
        let meta = std::fs::metadata(path)?;
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            return Ok(None);
        };
        Ok(Some(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            kind,
            path: path.to_path_buf(),
            size: meta.len(),
            modified: meta.modified().ok(),
        }))
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("names.txt");
        std::fs::write(&file, "alice\n").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let f = Entry::from_path(&file).unwrap().unwrap();
        assert_eq!(f.kind, EntryKind::File);
        assert_eq!(f.name, "names.txt");
        assert_eq!(f.size, 6);

        let d = Entry::from_path(&dir.path().join("sub")).unwrap().unwrap();
        assert!(d.is_dir());
        assert_eq!(d.kind.label(), "dir");
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Entry::from_path(&dir.path().join("gone")).is_err());
    }
}
