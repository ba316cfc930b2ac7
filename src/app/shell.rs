//! The dispatcher's view of the user: menus, prompts and reports.
//!
//! [`crate::ui::console::ConsoleShell`] implements this for a real terminal;
//! tests drive the state machine with a scripted implementation.

use crate::core::browser::Picker;
use crate::core::fs::CorpusSummary;
use crate::core::import::ImportReport;
use crate::core::merge::MergeReport;
use crate::error::{CommandError, Interrupted};
use crate::sync::{SyncError, SyncOutcome};

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    BrowseAndMerge,
    Import,
    MergeTwo,
}

impl MenuChoice {
    /// Display order, with the number the user types.
    pub const ALL: &[(u8, MenuChoice)] = &[
        (1, MenuChoice::BrowseAndMerge),
        (2, MenuChoice::Import),
        (3, MenuChoice::MergeTwo),
        (0, MenuChoice::Exit),
    ];

    pub const DEFAULT: MenuChoice = MenuChoice::BrowseAndMerge;

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().find(|(k, _)| *k == n).map(|(_, c)| *c)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::BrowseAndMerge => "Browse the corpus and merge selected files",
            MenuChoice::Import => "Import your own wordlist as the merged list",
            MenuChoice::MergeTwo => "Merge two wordlists into the merged list",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Outcomes and messages the dispatcher hands back for display.
#[derive(Debug)]
pub enum Report {
    /// Heading before a browse session, e.g. which side of a pair is picked.
    Heading(String),
    Synced(SyncOutcome),
    SyncFailed(SyncError),
    Corpus(CorpusSummary),
    Merged(MergeReport),
    Imported(ImportReport),
    NothingSelected,
    Aborted,
    Failed(CommandError),
    Farewell { interrupted: bool },
}

pub trait Shell: Picker {
    /// Ask for a main-menu choice; invalid input is re-prompted here.
    fn choose(&mut self) -> Result<MenuChoice, Interrupted>;
    /// Free-form path answer (already trimmed; may be empty).
    fn ask_path(&mut self, prompt: &str) -> Result<String, Interrupted>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, Interrupted>;
    fn report(&mut self, report: Report);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_map_to_choices() {
        assert_eq!(MenuChoice::from_number(0), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(3), Some(MenuChoice::MergeTwo));
        assert_eq!(MenuChoice::from_number(4), None);
    }
}
