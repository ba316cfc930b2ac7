//! Interactive tree browser: turns the mirror into an indexed menu and walks
//! it until the user picks one or more files.
//!
//! The browser never touches the terminal. It talks to a [`Picker`], which
//! renders listings and hands back already-validated [`Selection`]s.

use std::io;
use std::path::{Path, PathBuf};

use super::entry::Entry;
use super::fs::{self, ListConfig};
use super::selection::Selection;
use crate::error::Interrupted;

// ───────────────────────────────────────── capability ────────

/// Something the browser wants the user to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseNotice {
    /// The directory has nothing to offer.
    Empty(PathBuf),
    /// The directory could not be listed; treated as empty.
    Unreadable { path: PathBuf, reason: String },
    /// A directory was picked together with other entries under
    /// [`MixedSelection::Reject`].
    MixedRejected,
}

/// Presentation side of a browse session.
pub trait Picker {
    /// Show `entries` of the directory at `location` (relative to the root).
    fn present(&mut self, location: &Path, entries: &[Entry]);
    /// Ask which of the presented entries to take.
    fn pick(&mut self) -> Result<Selection, Interrupted>;
    fn notice(&mut self, notice: BrowseNotice);
}

/// How to treat a batch that contains a directory alongside other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixedSelection {
    /// Enter the first directory in selection order; drop the rest.
    #[default]
    DescendFirst,
    /// Refuse the batch and ask again at the same level.
    Reject,
}

impl MixedSelection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "descend" | "descend_first" => Some(MixedSelection::DescendFirst),
            "reject" => Some(MixedSelection::Reject),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── browser ───────────

/// What one resolved batch asks the browser to do.
enum Step {
    Descend(PathBuf),
    Take(Vec<PathBuf>),
    Rejected,
}

/// Browser rooted at the mirror directory.
#[derive(Debug, Clone)]
pub struct TreeBrowser {
    root: PathBuf,
    list_config: ListConfig,
    mixed: MixedSelection,
}

impl TreeBrowser {
    pub fn new(root: PathBuf, list_config: ListConfig, mixed: MixedSelection) -> Self {
        Self {
            root,
            list_config,
            mixed,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted entries of `dir`.
    pub fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        fs::list_dir(dir, &self.list_config)
    }

    /// Run a browse session starting at the root.
    ///
    /// Returns the picked files, or an empty list when the user backs out of
    /// the root. Cancelling below the root moves to the parent directory.
    pub fn browse<P: Picker + ?Sized>(&self, picker: &mut P) -> Result<Vec<PathBuf>, Interrupted> {
        let mut current = self.root.clone();
        loop {
            let entries = match self.list(&current) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!("failed to list {}: {err}", current.display());
                    picker.notice(BrowseNotice::Unreadable {
                        path: current.clone(),
                        reason: err.to_string(),
                    });
                    Vec::new()
                }
            };

            if entries.is_empty() {
                picker.notice(BrowseNotice::Empty(current.clone()));
                match self.parent_of(&current) {
                    Some(parent) => {
                        current = parent;
                        continue;
                    }
                    None => return Ok(Vec::new()),
                }
            }

            let location = current.strip_prefix(&self.root).unwrap_or(Path::new(""));
            picker.present(location, &entries);

            let chosen = picker.pick()?.resolve(&entries);
            if chosen.is_empty() {
                match self.parent_of(&current) {
                    Some(parent) => {
                        current = parent;
                        continue;
                    }
                    None => return Ok(Vec::new()),
                }
            }

            match self.step(&chosen) {
                Step::Descend(dir) => current = dir,
                Step::Take(files) => return Ok(files),
                Step::Rejected => picker.notice(BrowseNotice::MixedRejected),
            }
        }
    }

    fn step(&self, chosen: &[&Entry]) -> Step {
        if self.mixed == MixedSelection::Reject
            && chosen.len() > 1
            && chosen.iter().any(|e| e.is_dir())
        {
            return Step::Rejected;
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in chosen {
            if entry.is_dir() {
                if !files.is_empty() || chosen.len() > 1 {
                    tracing::debug!(
                        "entering {} and dropping the rest of the selection",
                        entry.name
                    );
                }
                return Step::Descend(entry.path.clone());
            }
            if !files.contains(&entry.path) {
                files.push(entry.path.clone());
            }
        }
        Step::Take(files)
    }

    /// Parent of `dir`, or `None` at the root. Never leaves the root.
    fn parent_of(&self, dir: &Path) -> Option<PathBuf> {
        if dir == self.root {
            return None;
        }
        match dir.parent() {
            Some(parent) if parent.starts_with(&self.root) => Some(parent.to_path_buf()),
            _ => Some(self.root.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Picker that replays canned selections and records what it saw.
    #[derive(Default)]
    struct ScriptedPicker {
        answers: VecDeque<Selection>,
        shown: Vec<(PathBuf, Vec<String>)>,
        notices: Vec<BrowseNotice>,
    }

    impl ScriptedPicker {
        fn new(answers: Vec<Selection>) -> Self {
            Self {
                answers: answers.into(),
                ..Self::default()
            }
        }

        fn locations(&self) -> Vec<&Path> {
            self.shown.iter().map(|(p, _)| p.as_path()).collect()
        }
    }

    impl Picker for ScriptedPicker {
        fn present(&mut self, location: &Path, entries: &[Entry]) {
            let names = entries.iter().map(|e| e.name.clone()).collect();
            self.shown.push((location.to_path_buf(), names));
        }

        fn pick(&mut self) -> Result<Selection, Interrupted> {
            self.answers.pop_front().ok_or(Interrupted)
        }

        fn notice(&mut self, notice: BrowseNotice) {
            self.notices.push(notice);
        }
    }

    fn pick(indices: &[usize]) -> Selection {
        Selection::Indices(indices.to_vec())
    }

    /// root/
    ///   a.txt
    ///   b.txt
    ///   sub/
    ///     c.txt
    ///     deeper/
    ///       d.txt
    ///   void/
    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("a.txt"), "admin\n").unwrap();
        std::fs::write(root.join("b.txt"), "root\n").unwrap();
        std::fs::create_dir_all(root.join("sub/deeper")).unwrap();
        std::fs::write(root.join("sub/c.txt"), "guest\n").unwrap();
        std::fs::write(root.join("sub/deeper/d.txt"), "x\n").unwrap();
        std::fs::create_dir(root.join("void")).unwrap();
        dir
    }

    fn browser(root: &Path, mixed: MixedSelection) -> TreeBrowser {
        TreeBrowser::new(root.to_path_buf(), ListConfig::default(), mixed)
    }

    #[test]
    fn returns_selected_files() {
        let dir = corpus();
        let mut picker = ScriptedPicker::new(vec![pick(&[2, 1, 2])]);
        let files = browser(dir.path(), MixedSelection::default())
            .browse(&mut picker)
            .unwrap();
        assert_eq!(files, vec![dir.path().join("b.txt"), dir.path().join("a.txt")]);
        assert_eq!(picker.shown[0].1, vec!["a.txt", "b.txt", "sub", "void"]);
    }

    #[test]
    fn directory_wins_over_co_selected_files() {
        let dir = corpus();
        // a.txt, sub, b.txt: enter sub, then pick c.txt.
        let mut picker = ScriptedPicker::new(vec![pick(&[1, 3, 2]), pick(&[1])]);
        let files = browser(dir.path(), MixedSelection::DescendFirst)
            .browse(&mut picker)
            .unwrap();
        assert_eq!(files, vec![dir.path().join("sub/c.txt")]);
        assert_eq!(picker.locations(), vec![Path::new(""), Path::new("sub")]);
    }

    #[test]
    fn reject_policy_asks_again() {
        let dir = corpus();
        let mut picker = ScriptedPicker::new(vec![pick(&[1, 3]), pick(&[1])]);
        let files = browser(dir.path(), MixedSelection::Reject)
            .browse(&mut picker)
            .unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt")]);
        assert_eq!(picker.notices, vec![BrowseNotice::MixedRejected]);
        assert_eq!(picker.locations(), vec![Path::new(""), Path::new("")]);
    }

    #[test]
    fn cancel_at_root_returns_nothing() {
        let dir = corpus();
        let mut picker = ScriptedPicker::new(vec![Selection::Cancel]);
        let files = browser(dir.path(), MixedSelection::default())
            .browse(&mut picker)
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn cancel_below_root_goes_up() {
        let dir = corpus();
        // sub -> deeper -> cancel -> (sub) cancel -> (root) pick b.txt
        let mut picker = ScriptedPicker::new(vec![
            pick(&[3]),
            pick(&[2]),
            Selection::Cancel,
            pick(&[99]),
            pick(&[2]),
        ]);
        let files = browser(dir.path(), MixedSelection::default())
            .browse(&mut picker)
            .unwrap();
        assert_eq!(files, vec![dir.path().join("b.txt")]);
        assert_eq!(
            picker.locations(),
            vec![
                Path::new(""),
                Path::new("sub"),
                Path::new("sub/deeper"),
                Path::new("sub"),
                Path::new(""),
            ]
        );
    }

    #[test]
    fn empty_directory_backs_out_to_parent() {
        let dir = corpus();
        let mut picker = ScriptedPicker::new(vec![pick(&[4]), Selection::Cancel]);
        let files = browser(dir.path(), MixedSelection::default())
            .browse(&mut picker)
            .unwrap();
        assert!(files.is_empty());
        assert_eq!(picker.notices, vec![BrowseNotice::Empty(dir.path().join("void"))]);
        assert_eq!(picker.locations(), vec![Path::new(""), Path::new("")]);
    }

    #[test]
    fn unreadable_root_ends_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("SecLists");
        let mut picker = ScriptedPicker::new(vec![]);
        let files = browser(&missing, MixedSelection::default())
            .browse(&mut picker)
            .unwrap();
        assert!(files.is_empty());
        assert!(matches!(picker.notices[0], BrowseNotice::Unreadable { .. }));
        assert_eq!(picker.notices[1], BrowseNotice::Empty(missing));
        assert!(picker.shown.is_empty());
    }

    #[test]
    fn interrupt_propagates() {
        let dir = corpus();
        let mut picker = ScriptedPicker::new(vec![]);
        let result = browser(dir.path(), MixedSelection::default()).browse(&mut picker);
        assert_eq!(result, Err(Interrupted));
    }

    #[test]
    fn mixed_selection_parses() {
        assert_eq!(MixedSelection::parse("Reject"), Some(MixedSelection::Reject));
        assert_eq!(MixedSelection::parse(" descend "), Some(MixedSelection::DescendFirst));
        assert_eq!(MixedSelection::parse("both"), None);
    }
}
