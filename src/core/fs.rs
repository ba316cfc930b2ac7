//! Filesystem listing: one directory level at a time, plus a whole-corpus
//! summary walk.
//!
//! Listings go through the [`ignore`] walker capped at depth 1 so hidden
//! entries and `.gitignore` rules are handled the same way everywhere.

use std::io;
use std::path::Path;

use ignore::WalkBuilder;
use walkdir::WalkDir;

use super::entry::Entry;

/// Knobs for a single-level listing.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Show dot-prefixed entries (the mirror's `.git` among them).
    pub show_hidden: bool,
    /// Apply `.gitignore` rules found in the mirror.
    pub respect_gitignore: bool,
}

/// List the immediate children of `dir`, sorted by name (byte order).
///
/// Directories and files are interleaved in that order; there is no
/// type-based grouping. Fails if `dir` itself cannot be read.
pub fn list_dir(dir: &Path, config: &ListConfig) -> io::Result<Vec<Entry>> {
    // The walker swallows a failing root; surface it explicitly.
    std::fs::read_dir(dir)?;

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1)) // only immediate children
        .standard_filters(false)
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let walked = match result {
            Ok(walked) => walked,
            Err(err) => {
                tracing::debug!("skipping unreadable entry under {}: {err}", dir.display());
                continue;
            }
        };
        let path = walked.path();
        // Skip the directory itself (the walker yields the root first).
        if walked.depth() == 0 {
            continue;
        }
        match Entry::from_path(path) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(err) => tracing::debug!("cannot stat {}: {err}", path.display()),
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!("listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

// ───────────────────────────────────────── summary ───────────

/// Totals shown after the mirror has been synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    pub files: u64,
    pub dirs: u64,
    pub bytes: u64,
}

/// Count files, directories and bytes below `root`, skipping hidden
/// directories such as `.git`. A missing root yields an empty summary.
pub fn summarize(root: &Path) -> CorpusSummary {
    let mut summary = CorpusSummary::default();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker.flatten() {
        let ft = entry.file_type();
        if ft.is_dir() {
            summary.dirs += 1;
        } else if ft.is_file() {
            summary.files += 1;
            if let Ok(meta) = entry.metadata() {
                summary.bytes = summary.bytes.saturating_add(meta.len());
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::EntryKind;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_sorted_without_grouping() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("a_dir")).unwrap();
        std::fs::create_dir(dir.path().join("c_dir")).unwrap();
        std::fs::write(dir.path().join("B.txt"), "x").unwrap();

        let entries = list_dir(dir.path(), &ListConfig::default()).unwrap();
        assert_eq!(names(&entries), vec!["B.txt", "a_dir", "b.txt", "c_dir"]);
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[2].kind, EntryKind::File);
    }

    #[test]
    fn hidden_entries_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("list.txt"), "x").unwrap();

        let entries = list_dir(dir.path(), &ListConfig::default()).unwrap();
        assert_eq!(names(&entries), vec!["list.txt"]);

        let config = ListConfig {
            show_hidden: true,
            ..ListConfig::default()
        };
        let entries = list_dir(dir.path(), &config).unwrap();
        assert_eq!(names(&entries), vec![".git", "list.txt"]);
    }

    #[test]
    fn does_not_descend() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("outer/inner")).unwrap();
        std::fs::write(dir.path().join("outer/inner/deep.txt"), "x").unwrap();

        let entries = list_dir(dir.path(), &ListConfig::default()).unwrap();
        assert_eq!(names(&entries), vec!["outer"]);
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_dir(&dir.path().join("vanished"), &ListConfig::default()).is_err());

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(list_dir(&file, &ListConfig::default()).is_err());
    }

    #[test]
    fn summary_skips_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::write(dir.path().join(".git/objects/blob"), "xxxxxxxx").unwrap();
        std::fs::create_dir(dir.path().join("Passwords")).unwrap();
        std::fs::write(dir.path().join("Passwords/top.txt"), "1234\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "hi").unwrap();

        let summary = summarize(dir.path());
        assert_eq!(
            summary,
            CorpusSummary {
                files: 2,
                dirs: 1,
                bytes: 7,
            }
        );
        assert_eq!(summarize(&dir.path().join("nope")), CorpusSummary::default());
    }
}
