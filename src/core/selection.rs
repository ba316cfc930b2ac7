//! Validated user selections over a displayed listing.

use super::entry::Entry;

/// What the user picked from the currently displayed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancel,
    /// 1-based indices, in the order the user typed them.
    Indices(Vec<usize>),
}

impl Selection {
    /// Resolve indices against `entries`, silently dropping anything out of
    /// range. An empty result means the same as [`Selection::Cancel`].
    pub fn resolve<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        match self {
            Selection::Cancel => Vec::new(),
            Selection::Indices(indices) => indices
                .iter()
                .filter(|&&i| i >= 1 && i <= entries.len())
                .map(|&i| &entries[i - 1])
                .collect(),
        }
    }
}
